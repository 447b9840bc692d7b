use projgraph_lib::graph::{
    DirectoryPlanner, ExternalToolLocator, GraphError, OrderConstraintResolver, ProjectGraph,
    ProjectTree,
};
use projgraph_lib::primitives::{ProjectNode, ProjectRole, SdkBounds, ToolLocation, ToolProvenance};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn tool() -> Arc<ToolLocation> {
    Arc::new(ToolLocation {
        path: PathBuf::from("/opt/sdk"),
        provenance: ToolProvenance::Environment,
    })
}

#[test]
fn test_components_compose_like_the_graph() {
    let root = ProjectNode::root("case100");
    let children = vec![
        ProjectNode::new(":app", ProjectRole::Application),
        ProjectNode::new(":camera", ProjectRole::Library).with_sdk(SdkBounds {
            min: Some(21),
            ..SdkBounds::default()
        }),
    ];

    let plan = DirectoryPlanner::new()
        .plan(&root, &children, Path::new("/work/build"))
        .unwrap();
    assert_eq!(plan.get(":camera"), Some(Path::new("/work/build/camera")));

    let mut nodes = vec![root];
    nodes.extend(children);
    let constraints = OrderConstraintResolver::new().constrain(&nodes).unwrap();
    assert_eq!(constraints.order, vec![":", ":app", ":camera"]);
}

#[test]
fn test_graph_from_parsed_tree() {
    let tree: ProjectTree = toml::from_str(
        r#"
[root]
name = "demo"
build_dir = "out"

[defaults]
compile_sdk = 34

[[project]]
path = ":app"
role = "app"

[[project]]
path = ":camera"
role = "lib"
"#,
    )
    .unwrap();

    let graph = ProjectGraph::build(&tree, Path::new("/work/android"), tool()).unwrap();

    assert_eq!(graph.build_root(), Path::new("/work/android/out"));
    let camera = graph.node(":camera").unwrap();
    assert_eq!(camera.sdk, SdkBounds::new(34, 24, 35));
    assert_eq!(camera.output_dir.as_deref(), Some(Path::new("/work/android/out/camera")));
}

#[test]
fn test_two_applications_are_rejected() {
    let tree: ProjectTree = toml::from_str(
        "[root]\nname = \"r\"\n[[project]]\npath = \":a\"\nrole = \"application\"\n[[project]]\npath = \":b\"\nrole = \"application\"\n",
    )
    .unwrap();

    let err = ProjectGraph::build(&tree, Path::new("/work"), tool()).unwrap_err();
    assert!(matches!(err, GraphError::MultipleApplications { .. }));
}

#[test]
fn test_locator_is_repeatable() {
    let locator = ExternalToolLocator::default();
    let lookup = |name: &str| (name == "TOOL_SDK").then(|| "/env/sdk".to_string());

    let first = locator
        .resolve_with(Path::new("/nonexistent/local.properties"), "TOOL_SDK", lookup)
        .unwrap();
    let second = locator
        .resolve_with(Path::new("/nonexistent/local.properties"), "TOOL_SDK", lookup)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.provenance, ToolProvenance::Environment);
}
