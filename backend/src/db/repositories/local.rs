//! In-memory local repository implementation.
//!
//! Interventions live in an id-ordered map behind a `parking_lot` lock. The
//! repository can be seeded from a JSON export, which makes it suitable both for
//! tests and for running the CLI against a dump of the production data.

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::{
    ErrorContext, InterventionRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Intervention, InterventionId, UserId};

/// In-memory local repository.
///
/// # Example
/// ```
/// use intervention_stats::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::from_json_str(r#"[{
///     "id": 1, "date": "2025-03-14", "team": "equipe1", "section": "Mécanique",
///     "maintenanceType": "preventive", "startTime": "09:00", "endTime": "17:00"
/// }]"#).unwrap();
/// assert_eq!(repo.len(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    interventions: BTreeMap<InterventionId, Intervention>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            interventions: BTreeMap::new(),
            is_healthy: true,
        }
    }
}

/// A dataset is either a bare array or an object wrapping it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    List(Vec<Intervention>),
    Wrapped { interventions: Vec<Intervention> },
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository holding `interventions`.
    ///
    /// Ids must be unique; a duplicate is reported as a load error naming it.
    pub fn with_interventions(
        interventions: impl IntoIterator<Item = Intervention>,
    ) -> RepositoryResult<Self> {
        let mut map = BTreeMap::new();
        for intervention in interventions {
            let id = intervention.id;
            if map.insert(id, intervention).is_some() {
                return Err(RepositoryError::load_with_context(
                    format!("Duplicate intervention id {}", id),
                    ErrorContext::new("load_dataset")
                        .with_entity("intervention")
                        .with_entity_id(id),
                ));
            }
        }

        Ok(Self {
            data: Arc::new(RwLock::new(LocalData {
                interventions: map,
                is_healthy: true,
            })),
        })
    }

    /// Parse a JSON dataset.
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)
            .map_err(|e| RepositoryError::from(e).with_operation("load_dataset"))?;
        let interventions = match dataset {
            Dataset::List(list) => list,
            Dataset::Wrapped { interventions } => interventions,
        };
        Self::with_interventions(interventions)
    }

    /// Read and parse a JSON dataset file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::load_with_context(
                format!("Failed to read dataset: {}", e),
                ErrorContext::new("load_dataset").with_details(path.display().to_string()),
            )
        })?;

        let repo = Self::from_json_str(&content).map_err(|e| match e {
            RepositoryError::LoadError {
                message,
                mut context,
            } => {
                let location = context
                    .details
                    .take()
                    .map(|d| format!("{} ({})", path.display(), d))
                    .unwrap_or_else(|| path.display().to_string());
                RepositoryError::load_with_context(message, context.with_details(location))
            }
            other => other,
        })?;

        info!(
            "Loaded {} interventions from {}",
            repo.len(),
            path.display()
        );
        Ok(repo)
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().interventions.clear();
    }

    /// Number of stored interventions.
    pub fn len(&self) -> usize {
        self.data.read().interventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().interventions.is_empty()
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::internal_with_context(
                "Repository is not healthy",
                ErrorContext::new(operation).retryable(),
            ));
        }
        Ok(())
    }

    fn not_found(operation: &str, id: InterventionId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Intervention {} not found", id),
            ErrorContext::new(operation)
                .with_entity("intervention")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterventionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_interventions(&self) -> RepositoryResult<Vec<Intervention>> {
        self.check_health("list_interventions")?;
        Ok(self.data.read().interventions.values().cloned().collect())
    }

    async fn list_interventions_for_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Intervention>> {
        self.check_health("list_interventions_for_user")?;
        Ok(self
            .data
            .read()
            .interventions
            .values()
            .filter(|i| i.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn get_intervention(&self, id: InterventionId) -> RepositoryResult<Intervention> {
        self.check_health("get_intervention")?;
        self.data
            .read()
            .interventions
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("get_intervention", id))
    }

    async fn store_intervention(
        &self,
        intervention: &Intervention,
    ) -> RepositoryResult<InterventionId> {
        self.check_health("store_intervention")?;

        let mut data = self.data.write();
        let id = match data.interventions.keys().next_back() {
            Some(last) => last.next().ok_or_else(|| {
                RepositoryError::internal_with_context(
                    "Intervention id space exhausted",
                    ErrorContext::new("store_intervention")
                        .with_entity("intervention")
                        .with_entity_id(last),
                )
            })?,
            None => InterventionId::new(1),
        };

        let mut stored = intervention.clone();
        stored.id = id;
        data.interventions.insert(id, stored);
        debug!("Stored intervention {}", id);
        Ok(id)
    }

    async fn update_intervention(&self, intervention: &Intervention) -> RepositoryResult<()> {
        self.check_health("update_intervention")?;

        let mut data = self.data.write();
        let current = data
            .interventions
            .get_mut(&intervention.id)
            .ok_or_else(|| Self::not_found("update_intervention", intervention.id))?;

        if current.validated {
            return Err(RepositoryError::validation_with_context(
                format!(
                    "Intervention {} was already sent and can no longer be edited",
                    intervention.id
                ),
                ErrorContext::new("update_intervention")
                    .with_entity("intervention")
                    .with_entity_id(intervention.id),
            ));
        }

        *current = intervention.clone();
        debug!("Updated intervention {}", intervention.id);
        Ok(())
    }

    async fn validate_intervention(&self, id: InterventionId) -> RepositoryResult<Intervention> {
        self.check_health("validate_intervention")?;

        let mut data = self.data.write();
        let current = data
            .interventions
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("validate_intervention", id))?;

        if !current.validated {
            current.validated = true;
            debug!("Validated intervention {}", id);
        }
        Ok(current.clone())
    }
}
