//! High-level service layer.
//!
//! Repository-agnostic entry points that fetch interventions and hand them to
//! the statistics aggregator. They accept any [`InterventionRepository`],
//! including `dyn` trait objects produced by the factory.
//!
//! # Usage
//!
//! ```no_run
//! use intervention_stats::db::{services, repositories::LocalRepository};
//! use intervention_stats::services::{StatisticsAggregator, StatisticsFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::from_json_file("data/interventions.json")?;
//!     let stats = services::get_statistics(
//!         &repo,
//!         &StatisticsAggregator::default(),
//!         &StatisticsFilter::default(),
//!     )
//!     .await?;
//!     println!("{} interventions", stats.overview.total_interventions);
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::info;

use super::repository::{InterventionRepository, RepositoryError, RepositoryResult};
use crate::error::StatisticsError;
use crate::models::UserId;
use crate::routes::dashboard::DashboardStatistics;
use crate::routes::statistics::StatisticsData;
use crate::services::{StatisticsAggregator, StatisticsFilter};

/// Failure of a service-layer call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Check if the repository is healthy.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: InterventionRepository + ?Sized,
{
    repo.health_check().await
}

/// Statistics over every intervention matching `filter`.
pub async fn get_statistics<R>(
    repo: &R,
    aggregator: &StatisticsAggregator,
    filter: &StatisticsFilter,
) -> ServiceResult<StatisticsData>
where
    R: InterventionRepository + ?Sized,
{
    let interventions = repo.list_interventions().await?;
    info!(
        "Computing statistics over {} interventions",
        interventions.len()
    );
    Ok(aggregator.aggregate_filtered(&interventions, filter)?)
}

/// Statistics restricted to the interventions of one technician.
///
/// Any user set on `filter` is replaced by `user_id`.
pub async fn get_user_statistics<R>(
    repo: &R,
    aggregator: &StatisticsAggregator,
    user_id: UserId,
    filter: &StatisticsFilter,
) -> ServiceResult<StatisticsData>
where
    R: InterventionRepository + ?Sized,
{
    let interventions = repo.list_interventions_for_user(user_id).await?;
    info!(
        "Computing statistics for user {} over {} interventions",
        user_id,
        interventions.len()
    );
    let filter = filter.clone().user(user_id);
    Ok(aggregator.aggregate_filtered(&interventions, &filter)?)
}

/// Dashboard counters for one technician as of `today`.
pub async fn get_user_dashboard<R>(
    repo: &R,
    aggregator: &StatisticsAggregator,
    user_id: UserId,
    filter: &StatisticsFilter,
    today: NaiveDate,
) -> RepositoryResult<DashboardStatistics>
where
    R: InterventionRepository + ?Sized,
{
    let interventions = repo.list_interventions_for_user(user_id).await?;
    let filter = filter.clone().user(user_id);
    Ok(aggregator.dashboard(&interventions, &filter, today))
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
