//! Statistics computation.
//!
//! Everything in this module is pure: functions take intervention slices and
//! return DTOs from [`crate::routes`] without touching storage. The
//! repository-backed entry points live in [`crate::db::services`].

pub mod duration;
pub mod filter;
pub mod labels;
pub mod reducers;
pub mod rounding;
pub mod statistics;

pub use duration::{duration_hours, resolve_duration, InvertedRangePolicy};
pub use filter::{filter_interventions, StatisticsFilter, SubmissionStatus};
pub use labels::{display_labels, maintenance_type_label, month_label, DisplayLabels};
pub use rounding::{RoundingPolicy, MAX_DECIMALS};
pub use statistics::{aggregate, AggregatorConfig, StatisticsAggregator};
