//! Intervention statistics aggregator.
//!
//! One aggregator serves both the administrator statistics page and the
//! technician dashboard. It never mutates its input and keeps no state between
//! calls, so a single instance can be shared freely.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::duration::{resolve_duration, InvertedRangePolicy};
use super::filter::{filter_interventions, StatisticsFilter};
use super::reducers::{self, month_key, TimedIntervention};
use super::rounding::RoundingPolicy;
use crate::error::StatisticsResult;
use crate::models::Intervention;
use crate::routes::dashboard::DashboardStatistics;
use crate::routes::statistics::StatisticsData;

/// Tunable behaviour of the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Decimals kept on averages, totals, percentages and rates.
    pub decimals: u32,
    /// Handling of interventions whose end time precedes their start time.
    pub inverted_range: InvertedRangePolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            decimals: RoundingPolicy::default().decimals,
            inverted_range: InvertedRangePolicy::default(),
        }
    }
}

/// Turns a list of interventions into a [`StatisticsData`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregator {
    config: AggregatorConfig,
}

impl StatisticsAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    fn rounding(&self) -> RoundingPolicy {
        RoundingPolicy::new(self.config.decimals)
    }

    /// Compute every statistics dimension.
    ///
    /// Durations are resolved first; the first malformed or rejected time window
    /// aborts the whole computation. An empty input yields
    /// [`StatisticsData::empty`].
    pub fn aggregate(&self, interventions: &[Intervention]) -> StatisticsResult<StatisticsData> {
        if interventions.is_empty() {
            debug!("No interventions to aggregate");
            return Ok(StatisticsData::empty());
        }

        let timed = self.resolve_durations(interventions)?;

        let by_team = reducers::by_team(&timed);
        let by_section = reducers::by_section(&timed);
        let performance = reducers::performance(&timed, &by_team, &by_section);

        let data = StatisticsData {
            overview: reducers::overview(&timed),
            by_maintenance_type: reducers::by_maintenance_type(&timed),
            by_team,
            by_section,
            by_month: reducers::by_month(&timed),
            by_status: reducers::status_breakdown(interventions),
            performance,
        };

        debug!(
            "Aggregated {} interventions into {} teams, {} sections, {} months",
            interventions.len(),
            data.by_team.len(),
            data.by_section.len(),
            data.by_month.len()
        );

        Ok(self.rounding().apply(data))
    }

    /// Apply `filter`, then aggregate what remains.
    pub fn aggregate_filtered(
        &self,
        interventions: &[Intervention],
        filter: &StatisticsFilter,
    ) -> StatisticsResult<StatisticsData> {
        let filtered = filter_interventions(interventions, filter);
        debug!(
            "Filter kept {} of {} interventions",
            filtered.len(),
            interventions.len()
        );
        self.aggregate(&filtered)
    }

    /// Counters for a technician's dashboard.
    ///
    /// `today` decides which interventions count as "this month". Durations are
    /// not needed here, so malformed time windows do not fail the dashboard.
    pub fn dashboard(
        &self,
        interventions: &[Intervention],
        filter: &StatisticsFilter,
        today: NaiveDate,
    ) -> DashboardStatistics {
        let records: Vec<&Intervention> =
            interventions.iter().filter(|i| filter.matches(i)).collect();

        let status = reducers::status_breakdown(records.iter().copied());
        let sent = records.iter().filter(|i| i.validated).count();
        let current_month = month_key(today);
        let this_month = records
            .iter()
            .filter(|i| month_key(i.date) == current_month)
            .count();

        DashboardStatistics {
            total_interventions: records.len(),
            sent_interventions: sent,
            saved_interventions: records.len() - sent,
            active_interventions: status.active,
            inactive_interventions: status.inactive,
            this_month_interventions: this_month,
        }
    }

    fn resolve_durations<'a>(
        &self,
        interventions: &'a [Intervention],
    ) -> StatisticsResult<Vec<TimedIntervention<'a>>> {
        interventions
            .iter()
            .map(|record| {
                let hours = resolve_duration(record, self.config.inverted_range)?;
                Ok(TimedIntervention { record, hours })
            })
            .collect()
    }
}

/// Aggregate with the default configuration.
pub fn aggregate(interventions: &[Intervention]) -> StatisticsResult<StatisticsData> {
    StatisticsAggregator::default().aggregate(interventions)
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
