//! Tests for configuration loading and repository creation from it.

mod support;

use std::fs;

use intervention_stats::config::{AppConfig, DATA_PATH_ENV, INVERTED_RANGE_ENV};
use intervention_stats::db::{RepositoryError, RepositoryFactory};
use intervention_stats::services::InvertedRangePolicy;

use support::{fixture_path, with_scoped_env};

#[test]
fn test_from_file_resolves_relative_data_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::copy(fixture_path(), dir.path().join("data").join("interventions.json")).unwrap();

    let config_path = dir.path().join("intervention-stats.toml");
    fs::write(
        &config_path,
        r#"
[repository]
type = "local"
data_path = "data/interventions.json"

[statistics]
inverted_range = "wrap"
"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(
        config.repository.data_path.as_deref(),
        Some(dir.path().join("data").join("interventions.json").as_path())
    );
    assert_eq!(config.statistics.inverted_range, InvertedRangePolicy::Wrap);
    assert_eq!(config.statistics.decimals, 2);

    let repo = RepositoryFactory::from_config(&config);
    assert!(repo.is_ok());
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_from_file_parse_error_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[statistics\ndecimals = 2").unwrap();

    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert_eq!(
        err.context().details.as_deref(),
        Some(path.display().to_string().as_str())
    );
}

#[test]
fn test_env_overrides() {
    with_scoped_env(
        &[
            (DATA_PATH_ENV, Some("/tmp/other.json")),
            (INVERTED_RANGE_ENV, Some("Clamp")),
        ],
        || {
            let config = AppConfig::default().with_env_overrides().unwrap();
            assert_eq!(
                config.repository.data_path.as_deref(),
                Some(std::path::Path::new("/tmp/other.json"))
            );
            assert_eq!(config.statistics.inverted_range, InvertedRangePolicy::Clamp);
        },
    );
}

#[test]
fn test_invalid_env_override() {
    with_scoped_env(&[(INVERTED_RANGE_ENV, Some("sideways"))], || {
        let err = AppConfig::default().with_env_overrides().unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert!(err.to_string().contains("sideways"));
    });
}

#[test]
fn test_load_explicit_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[statistics]\ndecimals = 1\n").unwrap();

    with_scoped_env(
        &[(DATA_PATH_ENV, None), (INVERTED_RANGE_ENV, Some("wrap"))],
        || {
            let config = AppConfig::load(Some(path.as_path())).unwrap();
            assert_eq!(config.statistics.decimals, 1);
            assert_eq!(config.statistics.inverted_range, InvertedRangePolicy::Wrap);
            assert!(config.repository.data_path.is_none());
        },
    );
}

#[test]
fn test_factory_with_missing_dataset() {
    let mut config = AppConfig::default();
    config.repository.data_path = Some("/nonexistent/interventions.json".into());
    let err = RepositoryFactory::from_config(&config).err().unwrap();
    assert!(matches!(err, RepositoryError::LoadError { .. }));
}
