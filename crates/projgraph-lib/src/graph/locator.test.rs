use super::*;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_resolves_from_properties_file() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.dir=/opt/android\nsdk.path=/opt/sdk\n").unwrap();

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", no_env)
        .unwrap();

    assert_eq!(location.path, PathBuf::from("/opt/sdk"));
    assert_eq!(location.provenance, ToolProvenance::FileConfig);
}

#[test]
fn test_file_takes_precedence_over_environment() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.path=/opt/sdk\n").unwrap();

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", |_| Some("/usr/sdk".to_string()))
        .unwrap();

    assert_eq!(location.path, PathBuf::from("/opt/sdk"));
    assert_eq!(location.provenance, ToolProvenance::FileConfig);
}

#[test]
fn test_falls_back_to_environment_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", |name| {
            (name == "TOOL_SDK").then(|| "/usr/sdk".to_string())
        })
        .unwrap();

    assert_eq!(location.path, PathBuf::from("/usr/sdk"));
    assert_eq!(location.provenance, ToolProvenance::Environment);
}

#[test]
fn test_falls_back_to_environment_when_key_absent() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "# generated\nsdk.dir=/opt/android\nnot a property\n").unwrap();

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", |_| Some("/usr/sdk".to_string()))
        .unwrap();

    assert_eq!(location.provenance, ToolProvenance::Environment);
}

#[test]
fn test_missing_everywhere_is_configuration_missing() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");

    let err = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", no_env)
        .unwrap_err();

    match &err {
        GraphError::ConfigurationMissing { file, key, env_var } => {
            assert_eq!(file, &props);
            assert_eq!(key, "sdk.path");
            assert_eq!(env_var, "TOOL_SDK");
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("sdk.path=<path>"), "{message}");
    assert!(message.contains("TOOL_SDK"), "{message}");
}

#[test]
fn test_empty_values_count_as_absent() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.path=\n").unwrap();

    let err = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", |_| Some("   ".to_string()))
        .unwrap_err();

    assert!(matches!(err, GraphError::ConfigurationMissing { .. }));
}

#[test]
fn test_relative_file_value_resolves_against_file_directory() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.path=tools/sdk\n").unwrap();

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", no_env)
        .unwrap();

    assert!(location.path.is_absolute());
    assert!(location.path.ends_with("tools/sdk"));
    assert!(location.path.starts_with(temp_dir.path()));
}

#[test]
fn test_custom_property_key() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.path=/wrong\nflutter.sdk = /opt/flutter \n").unwrap();

    let locator = ExternalToolLocator::new("flutter.sdk");
    let location = locator.resolve_with(&props, "FLUTTER_SDK", no_env).unwrap();

    assert_eq!(locator.property_key(), "flutter.sdk");
    assert_eq!(location.path, PathBuf::from("/opt/flutter"));
}

#[test]
fn test_resolution_is_idempotent_and_read_only() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, "sdk.path=/opt/sdk\n").unwrap();
    let before = fs::read_to_string(&props).unwrap();

    let locator = ExternalToolLocator::default();
    let first = locator.resolve_with(&props, "TOOL_SDK", no_env).unwrap();
    let second = locator.resolve_with(&props, "TOOL_SDK", no_env).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&props).unwrap(), before);
}

#[test]
fn test_unreadable_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    // A directory exists at the path but cannot be read as a file
    let props = temp_dir.path().join("local.properties");
    fs::create_dir(&props).unwrap();

    let err = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", |_| Some("/usr/sdk".to_string()))
        .unwrap_err();

    assert!(matches!(err, GraphError::ToolConfigUnreadable { .. }));
}

#[test]
fn test_non_utf8_lines_do_not_block_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    fs::write(&props, b"# caf\xe9 comment\nsdk.path=/opt/sdk\n").unwrap();

    let location = ExternalToolLocator::default()
        .resolve_with(&props, "TOOL_SDK", no_env)
        .unwrap();

    assert_eq!(location.path, PathBuf::from("/opt/sdk"));
    assert_eq!(location.provenance, ToolProvenance::FileConfig);
}

#[test]
fn test_resolve_reads_process_environment() {
    let temp_dir = TempDir::new().unwrap();
    let props = temp_dir.path().join("local.properties");
    let var = "PROJGRAPH_LOCATOR_TEST_SDK";
    unsafe {
        std::env::set_var(var, "/usr/sdk");
    }

    let location = ExternalToolLocator::default().resolve(&props, var).unwrap();
    assert_eq!(location.path, PathBuf::from("/usr/sdk"));
    assert_eq!(location.provenance, ToolProvenance::Environment);

    unsafe {
        std::env::remove_var(var);
    }
}

#[test]
fn test_find_property_first_match_wins() {
    let content = "a=1\nsdk.path=/first\nsdk.path=/second\n";
    assert_eq!(find_property(content, "sdk.path").as_deref(), Some("/first"));
    assert_eq!(find_property(content, "missing"), None);
}

#[test]
fn test_find_property_empty_first_line_is_absent() {
    assert_eq!(find_property("sdk.path=\nsdk.path=/x\n", "sdk.path"), None);
}
