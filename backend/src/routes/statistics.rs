use serde::{Deserialize, Serialize};

// =========================================================
// Statistics types
// =========================================================

/// Top-level, ungrouped summary of the filtered interventions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_interventions: usize,
    pub validated_interventions: usize,
    pub pending_interventions: usize,
    pub average_duration_hours: f64,
    pub total_work_hours: f64,
    pub completion_rate: f64,
}

/// Statistics for one maintenance type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTypeStats {
    pub maintenance_type: String,
    pub count: usize,
    pub percentage: f64,
    pub validated: usize,
    pub average_duration: f64,
}

/// Statistics for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team: String,
    pub count: usize,
    pub validated: usize,
    pub total_hours: f64,
    pub average_duration: f64,
    pub completion_rate: f64,
}

/// Statistics for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStats {
    pub section: String,
    pub count: usize,
    pub validated: usize,
    pub percentage: f64,
}

/// Statistics for one calendar month, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub month: String,
    pub count: usize,
    pub validated: usize,
    pub total_hours: f64,
}

/// Counts by status flags. None of these relate to `validated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStats {
    pub active: usize,
    pub inactive: usize,
    pub with_planning: usize,
    pub with_reception: usize,
}

/// Duration extremes and best performers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub fastest_intervention: f64,
    pub slowest_intervention: f64,
    pub most_productive_team: Option<String>,
    pub most_active_section: Option<String>,
}

/// Complete statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsData {
    pub overview: OverviewStats,
    pub by_maintenance_type: Vec<MaintenanceTypeStats>,
    pub by_team: Vec<TeamStats>,
    pub by_section: Vec<SectionStats>,
    pub by_month: Vec<MonthlyStats>,
    pub by_status: StatusStats,
    pub performance: PerformanceStats,
}

impl StatisticsData {
    /// Result for zero interventions: zeros throughout, no groups.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no intervention contributed to this snapshot.
    pub fn is_empty(&self) -> bool {
        self.overview.total_interventions == 0
    }

    pub fn team(&self, team: &str) -> Option<&TeamStats> {
        self.by_team.iter().find(|t| t.team == team)
    }

    pub fn section(&self, section: &str) -> Option<&SectionStats> {
        self.by_section.iter().find(|s| s.section == section)
    }

    pub fn maintenance_type(&self, maintenance_type: &str) -> Option<&MaintenanceTypeStats> {
        self.by_maintenance_type
            .iter()
            .find(|m| m.maintenance_type == maintenance_type)
    }

    pub fn month(&self, month: &str) -> Option<&MonthlyStats> {
        self.by_month.iter().find(|m| m.month == month)
    }
}

/// Route function name constant for admin statistics
pub const GET_STATISTICS: &str = "get_statistics";

/// Route function name constant for per-technician statistics
pub const GET_USER_STATISTICS: &str = "get_user_statistics";
