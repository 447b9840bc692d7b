use super::*;
use crate::primitives::{ColorIntent, OutputFormat};
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_env_files_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = load_env_files_in(temp_dir.path()).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_env_local_wins_over_env() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env.local"),
        "PROJGRAPH_LOADER_TEST_LOCAL=local\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "PROJGRAPH_LOADER_TEST_LOCAL=shared\nPROJGRAPH_LOADER_TEST_SHARED=shared\n",
    )
    .unwrap();

    let loaded = load_env_files_in(temp_dir.path()).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(env::var("PROJGRAPH_LOADER_TEST_LOCAL").unwrap(), "local");
    assert_eq!(env::var("PROJGRAPH_LOADER_TEST_SHARED").unwrap(), "shared");

    unsafe {
        env::remove_var("PROJGRAPH_LOADER_TEST_LOCAL");
        env::remove_var("PROJGRAPH_LOADER_TEST_SHARED");
    }
}

#[test]
fn test_malformed_env_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "NOT VALID 'LINE\n").unwrap();

    let err = load_env_files_in(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFileError { .. }));
}

#[test]
fn test_environment_color_applies_under_cli() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let config = AppConfig::from_parts(env, AppConfig::default()).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_cli_overrides_environment() {
    let env = EnvironmentConfig {
        ci: Some("true".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorIntent::Always,
        output: OutputFormat::Json,
        ..AppConfig::default()
    };

    let config = AppConfig::from_parts(env, cli).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
    assert_eq!(config.output, OutputFormat::Json);
    assert!(config.workdir.is_some());
}

#[test]
fn test_invalid_sources_fail_validation() {
    let cli = AppConfig {
        sdk_env: "A=B".to_string(),
        ..AppConfig::default()
    };
    let err = AppConfig::from_parts(EnvironmentConfig::default(), cli).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}
