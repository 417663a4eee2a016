//! Application configuration file support.
//!
//! Settings are read from `intervention-stats.toml`:
//!
//! ```toml
//! [repository]
//! type = "local"
//! data_path = "data/interventions.json"
//!
//! [statistics]
//! decimals = 2
//! inverted_range = "reject"
//! ```
//!
//! Every section is optional. `INTERVENTION_STATS_DATA` and
//! `INTERVENTION_STATS_INVERTED_RANGE` override the file.

use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::services::{AggregatorConfig, InvertedRangePolicy, MAX_DECIMALS};

/// Name of the configuration file searched by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "intervention-stats.toml";

/// Overrides `repository.data_path`.
pub const DATA_PATH_ENV: &str = "INTERVENTION_STATS_DATA";

/// Overrides `statistics.inverted_range`.
pub const INVERTED_RANGE_ENV: &str = "INTERVENTION_STATS_INVERTED_RANGE";


/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub statistics: AggregatorConfig,
}

/// Repository settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// JSON dataset used to seed the local repository.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            data_path: None,
        }
    }
}

fn config_error(message: String, details: impl Into<String>) -> RepositoryError {
    RepositoryError::configuration_with_context(
        message,
        ErrorContext::new("load_config")
            .with_entity("config")
            .with_details(details),
    )
}

impl AppConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> RepositoryResult<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| config_error(format!("Failed to parse config file: {}", e), "toml"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A relative `data_path` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(
                format!("Failed to read config file: {}", e),
                path.display().to_string(),
            )
        })?;

        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            RepositoryError::ConfigurationError { message, context } => {
                RepositoryError::configuration_with_context(
                    message,
                    context.with_details(path.display().to_string()),
                )
            }
            other => other,
        })?;

        if let (Some(data_path), Some(dir)) = (config.repository.data_path.as_mut(), path.parent())
        {
            if data_path.is_relative() {
                *data_path = dir.join(&*data_path);
            }
        }

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `intervention-stats.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> RepositoryResult<Self> {
        match Self::find_default_file() {
            Some(path) => Self::from_file(path),
            None => Err(RepositoryError::configuration_with_context(
                format!("No {} found in standard locations", CONFIG_FILE_NAME),
                ErrorContext::new("load_config").with_entity("config"),
            )),
        }
    }

    fn find_default_file() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load `explicit` when given, otherwise the default location, falling back
    /// to defaults when no file exists. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> RepositoryResult<Self> {
        let config = match explicit.map(Path::to_path_buf).or_else(Self::find_default_file) {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.with_env_overrides()
    }

    /// Apply `INTERVENTION_STATS_DATA` and `INTERVENTION_STATS_INVERTED_RANGE`.
    pub fn with_env_overrides(mut self) -> RepositoryResult<Self> {
        if let Ok(path) = env::var(DATA_PATH_ENV) {
            if !path.trim().is_empty() {
                self.repository.data_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(value) = env::var(INVERTED_RANGE_ENV) {
            self.statistics.inverted_range = InvertedRangePolicy::from_str(&value)
                .map_err(|e| config_error(e, INVERTED_RANGE_ENV))?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> RepositoryResult<()> {
        self.repository_type()?;
        if self.statistics.decimals > MAX_DECIMALS {
            return Err(config_error(
                format!(
                    "statistics.decimals must be at most {}, got {}",
                    MAX_DECIMALS, self.statistics.decimals
                ),
                "statistics.decimals",
            ));
        }
        Ok(())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> RepositoryResult<RepositoryType> {
        RepositoryType::from_str(&self.repository.repo_type)
            .map_err(|e| config_error(format!("Invalid repository type: {}", e), "repository.type"))
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        self.statistics
    }
}
