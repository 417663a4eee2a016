//! # Intervention Statistics
//!
//! Aggregation engine for maintenance intervention records.
//!
//! Given a list of interventions (date, team, section, maintenance type, start
//! and end time, validation and status flags), the crate computes the
//! statistics shown on the administrator statistics page and the counters of
//! a technician's dashboard.
//!
//! ## Features
//!
//! - **Filtering**: date range, team, section, maintenance type, free-text search,
//!   submission state and owner, all combined with AND
//! - **Aggregation**: overview, per maintenance type, per team, per section,
//!   per month, status flags and performance extremes
//! - **Repository**: in-memory storage seeded from a JSON export
//! - **CLI**: `intervention-stats` prints statistics as JSON
//!
//! ## Architecture
//!
//! - [`api`]: Public re-exports of the DTOs and identifiers
//! - [`models`]: Input records and time-of-day parsing
//! - [`routes`]: Output DTOs and their operation names
//! - [`services`]: Pure statistics computation
//! - [`db`]: Repository pattern and the async service layer
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: Statistics error types
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use intervention_stats::api::Intervention;
//! use intervention_stats::services::aggregate;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let data = vec![
//!     Intervention::new(1, day, "equipe1", "Mécanique", "preventive", "09:00", "17:00")
//!         .with_validated(true),
//!     Intervention::new(2, day, "equipe1", "Mécanique", "corrective", "08:00", "12:00"),
//! ];
//!
//! let stats = aggregate(&data).unwrap();
//! assert_eq!(stats.overview.total_work_hours, 12.0);
//! assert_eq!(stats.overview.completion_rate, 50.0);
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
