use projgraph_lib::application::{AppConfig, EnvironmentConfig};
use projgraph_lib::primitives::{ColorIntent, ConfigError, LogLevel, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        properties_file: PathBuf::from("gradle.local"),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.properties_file, PathBuf::from("gradle.local"));
    assert_eq!(merged.color, ColorIntent::Never);

    // Default values should remain for non-overridden fields
    assert_eq!(merged.tree_file, PathBuf::from("projgraph.toml"));
    assert_eq!(
        merged.to_logger_config().level,
        LogLevel::Debug
    );
}

#[test]
fn test_sources_layering() {
    let env = EnvironmentConfig {
        clicolor: Some("0".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        workdir: Some(PathBuf::from("/work/android")),
        ..AppConfig::default()
    };

    let config = AppConfig::from_parts(env, cli).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
    assert_eq!(config.workdir, Some(PathBuf::from("/work/android")));

    let settings = config.graph_settings().unwrap();
    assert_eq!(
        settings.tree_path(),
        PathBuf::from("/work/android/projgraph.toml")
    );
}

#[test]
fn test_validation_error_surfaces() {
    let cli = AppConfig {
        sdk_key: String::new(),
        ..AppConfig::default()
    };
    let result = AppConfig::from_parts(EnvironmentConfig::default(), cli);
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}
