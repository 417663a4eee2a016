//! Public API surface.
//!
//! This file consolidates the input records, identifiers and output DTOs.
//! All DTOs derive Serialize/Deserialize for JSON serialization.

pub use crate::error::{StatisticsError, StatisticsResult, TimeField, TimeParseError};
pub use crate::models::Intervention;
pub use crate::models::InterventionId;
pub use crate::models::MaintenanceType;
pub use crate::models::TimeOfDay;
pub use crate::models::UserId;
pub use crate::routes::dashboard::DashboardStatistics;
pub use crate::routes::statistics::MaintenanceTypeStats;
pub use crate::routes::statistics::MonthlyStats;
pub use crate::routes::statistics::OverviewStats;
pub use crate::routes::statistics::PerformanceStats;
pub use crate::routes::statistics::SectionStats;
pub use crate::routes::statistics::StatisticsData;
pub use crate::routes::statistics::StatusStats;
pub use crate::routes::statistics::TeamStats;
pub use crate::services::filter::{StatisticsFilter, SubmissionStatus};

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
