//! Intervention repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Intervention, InterventionId, UserId};

/// Storage operations for interventions.
///
/// Listing methods return owned snapshots; callers never observe later writes
/// through a value they already hold.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    /// Check if the storage backend is usable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Every intervention, ordered by id.
    async fn list_interventions(&self) -> RepositoryResult<Vec<Intervention>>;

    /// Interventions created by one technician, ordered by id.
    async fn list_interventions_for_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Intervention>>;

    /// Retrieve one intervention.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the intervention doesn't exist
    async fn get_intervention(&self, id: InterventionId) -> RepositoryResult<Intervention>;

    /// Store a new intervention. The incoming id is ignored and a fresh one is
    /// assigned.
    async fn store_intervention(
        &self,
        intervention: &Intervention,
    ) -> RepositoryResult<InterventionId>;

    /// Replace an existing, still unvalidated intervention.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the intervention doesn't exist
    /// * `Err(RepositoryError::ValidationError)` - If it was already validated
    async fn update_intervention(&self, intervention: &Intervention) -> RepositoryResult<()>;

    /// Mark an intervention as validated (sent). Validating twice is a no-op.
    async fn validate_intervention(&self, id: InterventionId) -> RepositoryResult<Intervention>;
}
