use super::*;
use std::path::Path;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.tree_file, PathBuf::from("projgraph.toml"));
    assert_eq!(config.properties_file, PathBuf::from("local.properties"));
    assert_eq!(config.sdk_key, "sdk.path");
    assert_eq!(config.sdk_env, "TOOL_SDK");
}

#[test]
fn test_parser_defaults_match_default_impl() {
    let parsed = AppConfig::try_parse_from(["projgraph"]).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(parsed.tree_file, defaults.tree_file);
    assert_eq!(parsed.sdk_key, defaults.sdk_key);
    assert_eq!(parsed.log_format, defaults.log_format);
    assert_eq!(parsed.color, defaults.color);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        sdk_key: "flutter.sdk".to_string(),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.sdk_key, "flutter.sdk");
    assert_eq!(merged.sdk_env, "TOOL_SDK");
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        workdir: Some(PathBuf::from("/work")),
        output: OutputFormat::Json,
        ..AppConfig::default()
    };
    let merged = base.merge_with(AppConfig::default());

    assert_eq!(merged.workdir, Some(PathBuf::from("/work")));
    assert_eq!(merged.output, OutputFormat::Json);
}

#[test]
fn test_validate_fills_workdir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert!(config.workdir.is_some());
}

#[test]
fn test_validate_rejects_empty_key() {
    let mut config = AppConfig {
        sdk_key: "  ".to_string(),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_graph_settings_carry_overrides() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/work/android")),
        tree_file: PathBuf::from("graph.toml"),
        sdk_key: "flutter.sdk".to_string(),
        sdk_env: "FLUTTER_SDK".to_string(),
        ..AppConfig::default()
    };

    let settings = config.graph_settings().unwrap();
    assert_eq!(settings.tree_path(), Path::new("/work/android/graph.toml"));
    assert_eq!(
        settings.properties_path(),
        Path::new("/work/android/local.properties")
    );
    assert_eq!(settings.property_key, "flutter.sdk");
    assert_eq!(settings.sdk_env_var, "FLUTTER_SDK");
}

#[test]
fn test_logger_config_respects_explicit_color() {
    let config = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Debug);
    assert!(!logger.ansi);

    let config = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    assert!(config.to_logger_config().ansi);
}

#[test]
fn test_json_output_is_never_styled() {
    let config = AppConfig {
        color: ColorIntent::Always,
        output: OutputFormat::Json,
        ..AppConfig::default()
    };
    assert!(!config.styled_output());
}
