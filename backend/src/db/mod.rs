//! Storage access for interventions.
//!
//! This module provides abstractions for data access via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (CLI)                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Fetch, filter, aggregate                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │       (in-memory, JSON dataset seed)          │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use intervention_stats::config::AppConfig;
//! use intervention_stats::db::{services, RepositoryFactory};
//!
//! let config = AppConfig::load(None)?;
//! let repo = RepositoryFactory::from_config(&config)?;
//! let stats = services::get_statistics(repo.as_ref(), &aggregator, &filter).await?;
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{
    get_statistics, get_user_dashboard, get_user_statistics, health_check, ServiceError,
    ServiceResult,
};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, InterventionRepository, RepositoryError, RepositoryResult};
