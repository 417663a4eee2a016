//! Repository factory for dependency injection.
//!
//! Builds repository instances from runtime configuration.

use log::info;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{InterventionRepository, RepositoryResult};
use crate::config::AppConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use intervention_stats::config::AppConfig;
/// use intervention_stats::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::from_config(&AppConfig::default()).unwrap();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository of `repo_type`, seeded from `data_path` when given.
    pub fn create(
        repo_type: RepositoryType,
        data_path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn InterventionRepository>> {
        match repo_type {
            RepositoryType::Local => match data_path {
                Some(path) => Ok(Arc::new(LocalRepository::from_json_file(path)?)),
                None => {
                    info!("No dataset configured, starting with an empty repository");
                    Ok(Self::create_local())
                }
            },
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn InterventionRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create the repository described by `config`.
    pub fn from_config(config: &AppConfig) -> RepositoryResult<Arc<dyn InterventionRepository>> {
        let repo_type = config.repository_type()?;
        Self::create(repo_type, config.repository.data_path.as_deref())
    }
}
