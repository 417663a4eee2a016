//! Rounding applied once to a finished [`StatisticsData`].

use serde::{Deserialize, Serialize};

use crate::routes::statistics::StatisticsData;

/// Most decimals a policy will keep; larger requests are clamped to it.
pub const MAX_DECIMALS: u32 = 10;

/// Number of decimals kept on every derived real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    pub decimals: u32,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl RoundingPolicy {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    /// Round half away from zero.
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10f64.powi(self.decimals.min(MAX_DECIMALS) as i32);
        let rounded = (value * factor).round() / factor;
        // Avoid printing -0.0 for tiny negative inputs.
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Round averages, totals, percentages, rates and extremes. Counts are untouched.
    pub fn apply(&self, mut data: StatisticsData) -> StatisticsData {
        let overview = &mut data.overview;
        overview.average_duration_hours = self.round(overview.average_duration_hours);
        overview.total_work_hours = self.round(overview.total_work_hours);
        overview.completion_rate = self.round(overview.completion_rate);

        for stats in &mut data.by_maintenance_type {
            stats.percentage = self.round(stats.percentage);
            stats.average_duration = self.round(stats.average_duration);
        }
        for stats in &mut data.by_team {
            stats.total_hours = self.round(stats.total_hours);
            stats.average_duration = self.round(stats.average_duration);
            stats.completion_rate = self.round(stats.completion_rate);
        }
        for stats in &mut data.by_section {
            stats.percentage = self.round(stats.percentage);
        }
        for stats in &mut data.by_month {
            stats.total_hours = self.round(stats.total_hours);
        }

        let performance = &mut data.performance;
        performance.fastest_intervention = self.round(performance.fastest_intervention);
        performance.slowest_intervention = self.round(performance.slowest_intervention);

        data
    }
}
