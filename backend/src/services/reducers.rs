//! Group-by reducers shared by the admin statistics and the technician dashboard.
//!
//! Reducers work on interventions whose duration has already been resolved and
//! return unrounded values; rounding happens once, at the aggregator boundary.
//! Groups come out in first-encountered order, which also decides ties in
//! [`performance`].

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::models::Intervention;
use crate::routes::statistics::{
    MaintenanceTypeStats, MonthlyStats, OverviewStats, PerformanceStats, SectionStats,
    StatusStats, TeamStats,
};

/// An intervention paired with its resolved duration in hours.
#[derive(Debug, Clone, Copy)]
pub struct TimedIntervention<'a> {
    pub record: &'a Intervention,
    pub hours: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count: usize,
    validated: usize,
    total_hours: f64,
}

impl Tally {
    fn add(&mut self, item: &TimedIntervention<'_>) {
        self.count += 1;
        if item.record.validated {
            self.validated += 1;
        }
        self.total_hours += item.hours;
    }

    fn average_hours(&self) -> f64 {
        ratio(self.total_hours, self.count)
    }

    fn completion_rate(&self) -> f64 {
        percentage(self.validated, self.count)
    }
}

/// `part / whole`, or 0 when `whole` is 0.
pub(crate) fn ratio(part: f64, whole: usize) -> f64 {
    if whole > 0 {
        part / whole as f64
    } else {
        0.0
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part as f64, whole) * 100.0
}

/// Grouping key for the monthly breakdown, e.g. `2025-03`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Tally interventions per key, keeping keys in first-encountered order.
fn tally_by<F>(items: &[TimedIntervention<'_>], key: F) -> Vec<(String, Tally)>
where
    F: Fn(&Intervention) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Tally)> = Vec::new();

    for item in items {
        let k = key(item.record);
        let slot = match index.get(&k) {
            Some(&slot) => slot,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, Tally::default()));
                groups.len() - 1
            }
        };
        groups[slot].1.add(item);
    }

    groups
}

/// Ungrouped summary of all interventions.
pub fn overview(items: &[TimedIntervention<'_>]) -> OverviewStats {
    let mut total = Tally::default();
    for item in items {
        total.add(item);
    }

    OverviewStats {
        total_interventions: total.count,
        validated_interventions: total.validated,
        pending_interventions: total.count - total.validated,
        average_duration_hours: total.average_hours(),
        total_work_hours: total.total_hours,
        completion_rate: total.completion_rate(),
    }
}

pub fn by_maintenance_type(items: &[TimedIntervention<'_>]) -> Vec<MaintenanceTypeStats> {
    let grand_total = items.len();
    tally_by(items, |i| i.maintenance_type.as_str().to_string())
        .into_iter()
        .map(|(maintenance_type, tally)| MaintenanceTypeStats {
            maintenance_type,
            count: tally.count,
            percentage: percentage(tally.count, grand_total),
            validated: tally.validated,
            average_duration: tally.average_hours(),
        })
        .collect()
}

pub fn by_team(items: &[TimedIntervention<'_>]) -> Vec<TeamStats> {
    tally_by(items, |i| i.team.clone())
        .into_iter()
        .map(|(team, tally)| TeamStats {
            team,
            count: tally.count,
            validated: tally.validated,
            total_hours: tally.total_hours,
            average_duration: tally.average_hours(),
            completion_rate: tally.completion_rate(),
        })
        .collect()
}

pub fn by_section(items: &[TimedIntervention<'_>]) -> Vec<SectionStats> {
    let grand_total = items.len();
    tally_by(items, |i| i.section.clone())
        .into_iter()
        .map(|(section, tally)| SectionStats {
            section,
            count: tally.count,
            validated: tally.validated,
            percentage: percentage(tally.count, grand_total),
        })
        .collect()
}

pub fn by_month(items: &[TimedIntervention<'_>]) -> Vec<MonthlyStats> {
    tally_by(items, |i| month_key(i.date))
        .into_iter()
        .map(|(month, tally)| MonthlyStats {
            month,
            count: tally.count,
            validated: tally.validated,
            total_hours: tally.total_hours,
        })
        .collect()
}

/// Counts by the `active`, `planning` and `reception` flags.
pub fn status_breakdown<'a, I>(records: I) -> StatusStats
where
    I: IntoIterator<Item = &'a Intervention>,
{
    let mut stats = StatusStats::default();
    for record in records {
        if record.active {
            stats.active += 1;
        } else {
            stats.inactive += 1;
        }
        if record.planning {
            stats.with_planning += 1;
        }
        if record.reception {
            stats.with_reception += 1;
        }
    }
    stats
}

/// Duration extremes plus the best team and section.
///
/// The most productive team has the highest completion rate and the most active
/// section the highest count; on a tie the earlier group wins.
pub fn performance(
    items: &[TimedIntervention<'_>],
    teams: &[TeamStats],
    sections: &[SectionStats],
) -> PerformanceStats {
    let (fastest, slowest) = if items.is_empty() {
        (0.0, 0.0)
    } else {
        items.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), item| {
            (min.min(item.hours), max.max(item.hours))
        })
    };

    let most_productive_team = first_max_by(teams, |t| t.completion_rate).map(|t| t.team.clone());
    let most_active_section =
        first_max_by(sections, |s| s.count as f64).map(|s| s.section.clone());

    PerformanceStats {
        fastest_intervention: fastest,
        slowest_intervention: slowest,
        most_productive_team,
        most_active_section,
    }
}

/// First element carrying the maximum value; later equal values do not replace it.
fn first_max_by<T, F>(items: &[T], value: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if value(item) <= value(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

#[cfg(test)]
#[path = "reducers_tests.rs"]
mod reducers_tests;
