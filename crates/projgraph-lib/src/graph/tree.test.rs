use super::*;
use std::fs;
use tempfile::TempDir;

const TREE: &str = r#"
[root]
name = "case100"
group = "com.sensor"

[defaults]
compile_sdk = 35

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
minify_enabled = false
shrink_resources = false

[[project]]
path = ":isar_flutter_libs"
role = "lib"
group = "dev.isar.isar_flutter_libs"
evaluation_depends_on = [":app"]
"#;

#[test]
fn test_parse_full_tree() {
    let tree: ProjectTree = toml::from_str(TREE).unwrap();

    assert_eq!(tree.root.name, "case100");
    assert_eq!(tree.root.build_dir, PathBuf::from("../build"));
    assert_eq!(tree.defaults.compile_sdk, 35);
    // Unspecified defaults keep their built-in values
    assert_eq!(tree.defaults.min_sdk, 24);
    assert_eq!(tree.defaults.jvm_target, "17");
    assert_eq!(tree.defaults.namespaces.len(), 1);
    assert_eq!(tree.projects.len(), 2);

    let app = &tree.projects[0];
    assert_eq!(app.role, ProjectRole::Application);
    assert_eq!(app.sdk, SdkBounds::new(36, 24, 35));
    let release = &app.build_types["release"];
    assert_eq!(release.signing_config.as_deref(), Some("debug"));
    assert!(!release.minify_enabled);
}

#[test]
fn test_role_aliases_in_tree() {
    let tree: ProjectTree = toml::from_str(TREE).unwrap();
    assert_eq!(tree.projects[1].role, ProjectRole::Library);
}

#[test]
fn test_nodes_carry_declared_values() {
    let tree: ProjectTree = toml::from_str(TREE).unwrap();

    let root = tree.root_node();
    assert_eq!(root.path, ":");
    assert_eq!(root.group.as_deref(), Some("com.sensor"));

    let nodes = tree.subproject_nodes();
    assert_eq!(nodes[0].name, "app");
    assert_eq!(nodes[0].namespace.as_deref(), Some("com.sensor.case100"));
    assert_eq!(nodes[1].name, "isar_flutter_libs");
    assert_eq!(nodes[1].evaluation_depends_on, vec![":app"]);
    assert_eq!(nodes[1].namespace, None);
    assert_eq!(nodes[1].output_dir, None);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let err = toml::from_str::<ProjectTree>(
        r#"
[root]
name = "r"

[[project]]
path = ":a"
role = "library"
namespcae = "typo"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("namespcae"));

    let err = toml::from_str::<ProjectTree>("[root]\nname = \"x\"\n[defaults]\ncompile_skd = 30\n")
        .unwrap_err();
    assert!(err.to_string().contains("compile_skd"));
}

#[test]
fn test_minimal_tree() {
    let tree: ProjectTree = toml::from_str("[root]\nname = \"r\"\n").unwrap();
    assert!(tree.projects.is_empty());
    assert_eq!(tree.defaults, GraphDefaults::default());
}

#[test]
fn test_load_reports_read_and_parse_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("projgraph.toml");
    assert!(matches!(
        ProjectTree::load(&missing),
        Err(GraphError::TreeRead { .. })
    ));

    fs::write(&missing, "[root\n").unwrap();
    assert!(matches!(
        ProjectTree::load(&missing),
        Err(GraphError::TreeParse { .. })
    ));

    fs::write(&missing, TREE).unwrap();
    let tree = ProjectTree::load(&missing).unwrap();
    assert_eq!(tree.projects.len(), 2);
}

#[test]
fn test_build_root_is_relative_to_project_dir() {
    let tree: ProjectTree = toml::from_str(TREE).unwrap();
    assert_eq!(
        tree.build_root(Path::new("/work/mobile/android")),
        PathBuf::from("/work/mobile/build")
    );
}
