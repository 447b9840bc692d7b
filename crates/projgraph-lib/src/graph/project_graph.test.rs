use super::*;
use crate::graph::materialize::RecordingMaterializer;
use crate::primitives::{ConfigField, SdkBounds, ToolProvenance};
use std::fs;
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

[project.sdk]
compile = 36
min = 24
target = 35

[project.build_types.release]
signing_config = "debug"

[[project]]
path = ":isar_flutter_libs"
role = "library"
group = "dev.isar.isar_flutter_libs"

[[project]]
path = ":path_provider"
role = "library"
group = "io.flutter.plugins.pathprovider"

[project.sdk]
min = 21
"#;

fn tool() -> Arc<ToolLocation> {
    Arc::new(ToolLocation {
        path: PathBuf::from("/opt/sdk"),
        provenance: ToolProvenance::FileConfig,
    })
}

fn build(tree: &str) -> Result<ProjectGraph, GraphError> {
    let tree: ProjectTree = toml::from_str(tree).unwrap();
    ProjectGraph::build(&tree, Path::new("/work/mobile/android"), tool())
}

#[test]
fn test_build_resolves_every_node() {
    let graph = build(TREE).unwrap();

    assert_eq!(graph.nodes().len(), 4);
    assert_eq!(graph.root().name, "case100");
    assert_eq!(graph.build_root(), Path::new("/work/mobile/build"));

    let app = graph.node(":app").unwrap();
    assert_eq!(app.output_dir.as_deref(), Some(Path::new("/work/mobile/build/app")));
    assert_eq!(app.namespace.as_deref(), Some("com.sensor.case100"));
    assert_eq!(
        app.build_types["release"].signing_config.as_deref(),
        Some("debug")
    );

    let isar = graph.node(":isar_flutter_libs").unwrap();
    assert_eq!(isar.sdk, SdkBounds::new(36, 24, 35));
    assert_eq!(isar.namespace.as_deref(), Some("dev.isar.isar_flutter_libs"));

    let provider = graph.node(":path_provider").unwrap();
    assert_eq!(provider.sdk, SdkBounds::new(36, 21, 35));
    assert_eq!(provider.namespace, None);
    assert!(!provider.defaulted.iter().any(|d| d.field == ConfigField::MinSdk));
}

#[test]
fn test_output_directories_are_unique() {
    let graph = build(TREE).unwrap();
    let dirs: HashSet<&Path> = graph
        .nodes()
        .iter()
        .map(|n| n.output_dir.as_deref().unwrap())
        .collect();
    assert_eq!(dirs.len(), graph.nodes().len());
}

#[test]
fn test_edges_and_evaluation_order() {
    let graph = build(TREE).unwrap();

    assert_eq!(graph.edges().len(), 2);
    assert_eq!(graph.ready_after(":isar_flutter_libs"), vec![":app"]);
    assert!(graph.ready_after(":app").is_empty());

    let order: Vec<&str> = graph.evaluation_order().map(|n| n.path.as_str()).collect();
    assert_eq!(order, vec![":", ":app", ":isar_flutter_libs", ":path_provider"]);
}

#[test]
fn test_tool_location_is_shared() {
    let tool = tool();
    let tree: ProjectTree = toml::from_str(TREE).unwrap();
    let graph = ProjectGraph::build(&tree, Path::new("/work"), Arc::clone(&tool)).unwrap();

    assert!(Arc::ptr_eq(&graph.tool_location(), &tool));
}

#[test]
fn test_report_serializes_in_evaluation_order() {
    let graph = build(TREE).unwrap();
    let json = serde_json::to_value(graph.report()).unwrap();

    assert_eq!(json["tool"]["provenance"], "FileConfig");
    assert_eq!(
        json["plugin_build_dir"],
        "/opt/sdk/packages/flutter_tools/gradle"
    );
    assert_eq!(json["projects"][1]["path"], ":app");
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn test_duplicate_names_fail_before_anything_else() {
    let err = build(
        r#"
[root]
name = "r"

[[project]]
path = ":a"
role = "library"

[[project]]
path = ":b"
role = "library"

[[project]]
path = ":a:util"
role = "library"

[[project]]
path = ":b:util"
role = "library"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateOutputDirectory { .. }));
}

#[test]
fn test_missing_parent_is_rejected() {
    let err = build(
        r#"
[root]
name = "r"

[[project]]
path = ":feature:auth"
role = "library"
"#,
    )
    .unwrap_err();
    match err {
        GraphError::MissingParent { path, parent } => {
            assert_eq!(path, ":feature:auth");
            assert_eq!(parent, ":feature");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_project_is_rejected() {
    let err = build(
        r#"
[root]
name = "r"

[[project]]
path = ":a"
role = "library"

[[project]]
path = ":a"
role = "application"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateProject { .. }));
}

#[test]
fn test_invalid_paths_and_roles_are_rejected() {
    let err = build("[root]\nname = \"r\"\n[[project]]\npath = \"app\"\nrole = \"library\"\n")
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidProjectPath { .. }));

    let err = build("[root]\nname = \"r\"\n[[project]]\npath = \":x\"\nrole = \"root\"\n")
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidProjectPath { .. }));
}

#[test]
fn test_cycle_aborts_build() {
    let err = build(
        r#"
[root]
name = "r"

[[project]]
path = ":app"
role = "application"
evaluation_depends_on = [":lib"]

[[project]]
path = ":lib"
role = "library"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::EvaluationCycle { .. }));
}

#[test]
fn test_materialize_creates_planned_directories() {
    let graph = build(TREE).unwrap();
    let fs = RecordingMaterializer::new();

    let created = graph.materialize(&fs).unwrap();

    assert_eq!(created.len(), 4);
    assert_eq!(created[0], PathBuf::from("/work/mobile/build"));
    assert_eq!(fs.created(), created);
}

#[test]
fn test_materialize_failure_names_directory() {
    let graph = build(TREE).unwrap();
    let fs = RecordingMaterializer::failing_on("/work/mobile/build/app");

    let err = graph.materialize(&fs).unwrap_err();
    match err {
        GraphError::Materialization { path, .. } => {
            assert_eq!(path, PathBuf::from("/work/mobile/build/app"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path().join("android");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("projgraph.toml"), TREE).unwrap();
    fs::write(project_dir.join("local.properties"), "sdk.path=/opt/sdk\n").unwrap();

    let settings = GraphSettings::new(&project_dir);
    let graph = ProjectGraph::load(&settings).unwrap();

    assert_eq!(graph.tool_location().provenance, ToolProvenance::FileConfig);
    assert_eq!(graph.build_root(), temp_dir.path().join("build"));
    // Planning never creates directories
    assert!(!temp_dir.path().join("build").exists());
}

#[test]
fn test_missing_tool_location_aborts_before_reading_tree() {
    let temp_dir = TempDir::new().unwrap();
    let settings = GraphSettings {
        sdk_env_var: "PROJGRAPH_GRAPH_TEST_UNSET_SDK".to_string(),
        ..GraphSettings::new(temp_dir.path())
    };

    // No tree file either; the tool lookup must fail first
    let err = ProjectGraph::load(&settings).unwrap_err();
    assert!(matches!(err, GraphError::ConfigurationMissing { .. }));
}
