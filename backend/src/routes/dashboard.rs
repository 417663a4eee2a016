use serde::{Deserialize, Serialize};

// =========================================================
// Technician dashboard types
// =========================================================

/// Counters shown on a technician's own dashboard.
///
/// `sent` / `saved` split on the `validated` flag, `active` / `inactive` on the
/// status flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    pub total_interventions: usize,
    pub sent_interventions: usize,
    pub saved_interventions: usize,
    pub active_interventions: usize,
    pub inactive_interventions: usize,
    pub this_month_interventions: usize,
}

/// Route function name constant for the technician dashboard
pub const GET_USER_DASHBOARD: &str = "get_user_dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_json_keys() {
        let json = serde_json::to_value(DashboardStatistics::default()).unwrap();
        for key in [
            "totalInterventions",
            "sentInterventions",
            "savedInterventions",
            "activeInterventions",
            "inactiveInterventions",
            "thisMonthInterventions",
        ] {
            assert_eq!(json[key], 0, "missing {}", key);
        }
    }
}
