use super::*;
use crate::graph::materialize::RecordingMaterializer;
use crate::primitives::ColorIntent;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TREE: &str = r#"
[root]
name = "case100"

[defaults.namespaces]
"dev.isar.isar_flutter_libs" = "dev.isar.isar_flutter_libs"

[[project]]
path = ":app"
role = "application"
namespace = "com.sensor.case100"

[project.build_types.release]
signing_config = "debug"

[[project]]
path = ":isar_flutter_libs"
role = "library"
group = "dev.isar.isar_flutter_libs"
"#;

/// `<tmp>/android` with a tree file and, optionally, a properties file
fn project(properties: Option<&str>) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path().join("android");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("projgraph.toml"), TREE).unwrap();
    if let Some(content) = properties {
        fs::write(project_dir.join("local.properties"), content).unwrap();
    }
    (temp_dir, project_dir)
}

fn config(project_dir: &Path, output: OutputFormat) -> AppConfig {
    AppConfig {
        workdir: Some(project_dir.to_path_buf()),
        sdk_env: "PROJGRAPH_COMMANDS_TEST_UNSET_SDK".to_string(),
        color: ColorIntent::Never,
        output,
        ..AppConfig::default()
    }
}

fn run(command: Commands, config: &AppConfig, fs: &dyn DirectoryMaterializer) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with(command, config, fs, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

mod handle_plan_tests {
    use super::*;

    #[test]
    fn it_renders_resolved_projects() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Plan,
            &config(&dir, OutputFormat::Text),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        assert!(output.contains("/opt/sdk (file)"));
        assert!(output.contains("/opt/sdk/packages/flutter_tools/gradle"));
        assert!(output.contains(":isar_flutter_libs"));
        assert!(output.contains("compileSdk 36 (default: library-compile-sdk)"));
        assert!(output.contains("signing=debug"));
        assert!(output.contains("after      :app"));
    }

    #[test]
    fn it_emits_json_report() {
        let (tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Plan,
            &config(&dir, OutputFormat::Json),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        let report: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["tool"]["path"], "/opt/sdk");
        assert_eq!(
            report["build_root"],
            tmp.path().join("build").display().to_string()
        );
        assert_eq!(report["projects"].as_array().unwrap().len(), 3);
        assert_eq!(report["projects"][2]["namespace"], "dev.isar.isar_flutter_libs");
    }

    #[test]
    fn it_fails_without_tool_location() {
        let (_tmp, dir) = project(None);
        let err = run(
            Commands::Plan,
            &config(&dir, OutputFormat::Text),
            &RecordingMaterializer::new(),
        )
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("sdk.path=<path>"));
        assert!(message.contains("PROJGRAPH_COMMANDS_TEST_UNSET_SDK"));
    }
}

mod handle_order_tests {
    use super::*;

    #[test]
    fn it_lists_evaluation_order() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Order,
            &config(&dir, OutputFormat::Text),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  1. :");
        assert_eq!(lines[1], "  2. :app");
        assert_eq!(lines[2], "  3. :isar_flutter_libs after :app");
    }

    #[test]
    fn it_emits_json_edges() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Order,
            &config(&dir, OutputFormat::Json),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["order"], serde_json::json!([":", ":app", ":isar_flutter_libs"]));
        assert_eq!(value["edges"][0]["dependent"], ":isar_flutter_libs");
        assert_eq!(value["edges"][0]["dependency"], ":app");
    }
}

mod handle_locate_tests {
    use super::*;

    #[test]
    fn it_reports_provenance() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Locate,
            &config(&dir, OutputFormat::Json),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["path"], "/opt/sdk");
        assert_eq!(value["provenance"], "FileConfig");
    }

    #[test]
    fn it_does_not_need_a_tree() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        fs::remove_file(dir.join("projgraph.toml")).unwrap();

        let output = run(
            Commands::Locate,
            &config(&dir, OutputFormat::Text),
            &RecordingMaterializer::new(),
        )
        .unwrap();
        assert!(output.starts_with("tool     /opt/sdk"));
    }
}

mod handle_materialize_tests {
    use super::*;

    #[test]
    fn it_creates_planned_directories() {
        let (tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let output = run(
            Commands::Materialize { clean: false },
            &config(&dir, OutputFormat::Text),
            &FsMaterializer,
        )
        .unwrap();

        assert!(tmp.path().join("build").is_dir());
        assert!(tmp.path().join("build/app").is_dir());
        assert!(tmp.path().join("build/isar_flutter_libs").is_dir());
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn it_cleans_first_when_asked() {
        let (tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        let build = tmp.path().join("build");
        let recorder = RecordingMaterializer::new().with_existing(&build);

        let output = run(
            Commands::Materialize { clean: true },
            &config(&dir, OutputFormat::Json),
            &recorder,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["cleaned"], true);
        assert_eq!(recorder.removed(), vec![build.clone()]);
        assert_eq!(recorder.created()[0], build);
    }

    #[test]
    fn it_touches_nothing_when_graph_is_invalid() {
        let (_tmp, dir) = project(Some("sdk.path=/opt/sdk\n"));
        fs::write(
            dir.join("projgraph.toml"),
            "[root]\nname = \"r\"\n[[project]]\npath = \":a:x\"\nrole = \"library\"\n",
        )
        .unwrap();
        let recorder = RecordingMaterializer::new();

        let result = run(
            Commands::Materialize { clean: true },
            &config(&dir, OutputFormat::Text),
            &recorder,
        );

        assert!(result.is_err());
        assert!(recorder.created().is_empty());
        assert!(recorder.removed().is_empty());
    }
}

mod handle_clean_tests {
    use super::*;

    #[test]
    fn it_removes_build_root_without_tool_location() {
        let (tmp, dir) = project(None);
        let build = tmp.path().join("build");
        fs::create_dir_all(build.join("app")).unwrap();

        let output = run(Commands::Clean, &config(&dir, OutputFormat::Text), &FsMaterializer).unwrap();

        assert!(!build.exists());
        assert!(output.starts_with("removed"));
    }

    #[test]
    fn it_reports_nothing_to_clean() {
        let (_tmp, dir) = project(None);
        let output = run(
            Commands::Clean,
            &config(&dir, OutputFormat::Json),
            &RecordingMaterializer::new(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["removed"], false);
    }
}

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_displays_version_information() {
        let output = run(
            Commands::Version,
            &AppConfig::default(),
            &RecordingMaterializer::new(),
        )
        .unwrap();
        assert_eq!(output.trim(), format!("projgraph {}", env!("CARGO_PKG_VERSION")));
    }
}
