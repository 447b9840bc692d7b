use std::path::PathBuf;

#[test]
fn test_root_node_has_no_parent() {
    let root = ProjectNode::root("case100");
    assert_eq!(root.path, ROOT_PATH);
    assert_eq!(root.name, "case100");
    assert!(root.is_root());
    assert_eq!(root.parent_path(), None);
}

#[test]
fn test_subproject_name_is_last_segment() {
    let node = ProjectNode::new(":feature:auth", ProjectRole::Library);
    assert_eq!(node.name, "auth");
    assert_eq!(node.parent_path().as_deref(), Some(":feature"));

    let app = ProjectNode::new(":app", ProjectRole::Application);
    assert_eq!(app.name, "app");
    assert_eq!(app.parent_path().as_deref(), Some(ROOT_PATH));
}

#[test]
fn test_empty_namespace_counts_as_unset() {
    let node = ProjectNode::new(":lib", ProjectRole::Library).with_namespace("");
    assert!(!node.is_set(ConfigField::Namespace));

    let node = node.with_namespace("dev.example.lib");
    assert!(node.is_set(ConfigField::Namespace));
}

#[test]
fn test_sdk_fields_tracked_independently() {
    let node = ProjectNode::new(":lib", ProjectRole::Library).with_sdk(SdkBounds {
        compile: Some(34),
        min: None,
        target: None,
    });
    assert!(node.is_set(ConfigField::CompileSdk));
    assert!(!node.is_set(ConfigField::MinSdk));
    assert!(!node.is_set(ConfigField::TargetSdk));
}

#[test]
fn test_validate_project_path() {
    assert!(validate_project_path(":app").is_ok());
    assert!(validate_project_path(":feature:auth").is_ok());

    assert!(validate_project_path("app").is_err());
    assert!(validate_project_path(":").is_err());
    assert!(validate_project_path(":feature::auth").is_err());
    assert!(validate_project_path(":..").is_err());
    assert!(validate_project_path(":a/b").is_err());
}

#[test]
fn test_plugin_build_dir_is_inside_sdk() {
    let location = ToolLocation {
        path: PathBuf::from("/opt/sdk"),
        provenance: ToolProvenance::FileConfig,
    };
    assert_eq!(
        location.plugin_build_dir(),
        PathBuf::from("/opt/sdk/packages/flutter_tools/gradle")
    );
}

#[test]
fn test_evaluation_edge_display() {
    let edge = EvaluationEdge::new(":lib", ":app");
    assert_eq!(edge.to_string(), ":lib → :app");
}

#[test]
fn test_node_serializes_without_unset_fields() {
    let node = ProjectNode::new(":lib", ProjectRole::Library);
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["role"], "library");
    assert!(json.get("namespace").is_none());
    assert!(json.get("output_dir").is_none());
}
