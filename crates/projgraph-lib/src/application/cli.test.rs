use super::*;
use crate::primitives::{ColorIntent, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_no_subcommand_defaults_to_none() {
    let cli = CliConfig::try_from_args(["projgraph"]).unwrap();
    assert_eq!(cli.command, None);
}

#[test]
fn test_global_flags_before_subcommand() {
    let cli = CliConfig::try_from_args([
        "projgraph",
        "--workdir",
        "/work/android",
        "--output",
        "json",
        "--color",
        "never",
        "plan",
    ])
    .unwrap();

    assert_eq!(cli.command, Some(Commands::Plan));
    assert_eq!(cli.app_config.workdir, Some(PathBuf::from("/work/android")));
    assert_eq!(cli.app_config.output, OutputFormat::Json);
    assert_eq!(cli.app_config.color, ColorIntent::Never);
}

#[test]
fn test_materialize_clean_flag() {
    let cli = CliConfig::try_from_args(["projgraph", "materialize", "--clean"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Materialize { clean: true }));
}

#[test]
fn test_tool_lookup_overrides() {
    let cli = CliConfig::try_from_args([
        "projgraph",
        "--sdk-key",
        "flutter.sdk",
        "--sdk-env",
        "FLUTTER_SDK",
        "--properties",
        "gradle.properties",
        "locate",
    ])
    .unwrap();

    assert_eq!(cli.app_config.sdk_key, "flutter.sdk");
    assert_eq!(cli.app_config.sdk_env, "FLUTTER_SDK");
    assert_eq!(
        cli.app_config.properties_file,
        PathBuf::from("gradle.properties")
    );
}

#[test]
fn test_value_aliases_accepted() {
    let cli = CliConfig::try_from_args(["projgraph", "--log-format", "plain", "order"]).unwrap();
    assert_eq!(cli.app_config.log_format, crate::primitives::LogFormat::Text);
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(CliConfig::try_from_args(["projgraph", "deploy"]).is_err());
}

