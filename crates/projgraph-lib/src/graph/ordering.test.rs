use super::*;

fn nodes() -> Vec<ProjectNode> {
    vec![
        ProjectNode::root("case100"),
        ProjectNode::new(":l1", ProjectRole::Library),
        ProjectNode::new(":app", ProjectRole::Application),
        ProjectNode::new(":l2", ProjectRole::Library),
    ]
}

fn position(order: &[String], path: &str) -> usize {
    order.iter().position(|p| p == path).unwrap()
}

#[test]
fn test_libraries_evaluate_after_application() {
    let constraints = OrderConstraintResolver::new().constrain(&nodes()).unwrap();

    let expected: BTreeSet<EvaluationEdge> = [
        EvaluationEdge::new(":l1", ":app"),
        EvaluationEdge::new(":l2", ":app"),
    ]
    .into_iter()
    .collect();
    assert_eq!(constraints.edges, expected);

    // No edge between siblings
    assert!(
        !constraints
            .edges
            .iter()
            .any(|e| e.dependent.starts_with(":l") && e.dependency.starts_with(":l"))
    );
}

#[test]
fn test_evaluation_order_respects_edges_and_declaration_order() {
    let constraints = OrderConstraintResolver::new().constrain(&nodes()).unwrap();

    assert_eq!(constraints.order, vec![":", ":app", ":l1", ":l2"]);
    for edge in &constraints.edges {
        assert!(
            position(&constraints.order, &edge.dependency)
                < position(&constraints.order, &edge.dependent)
        );
    }
}

#[test]
fn test_without_application_there_are_no_edges() {
    let nodes = vec![
        ProjectNode::root("r"),
        ProjectNode::new(":a", ProjectRole::Library),
        ProjectNode::new(":b", ProjectRole::Library),
    ];
    let constraints = OrderConstraintResolver::new().constrain(&nodes).unwrap();
    assert!(constraints.edges.is_empty());
    assert_eq!(constraints.order, vec![":", ":a", ":b"]);
}

#[test]
fn test_self_reference_is_a_cycle() {
    let mut nodes = nodes();
    nodes.push(ProjectNode::new(":selfish", ProjectRole::Library).depends_on(":selfish"));

    let err = OrderConstraintResolver::new().constrain(&nodes).unwrap_err();
    match err {
        GraphError::EvaluationCycle { nodes } => assert_eq!(nodes, vec![":selfish"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_application_depending_on_library_is_a_cycle() {
    let nodes = vec![
        ProjectNode::root("r"),
        ProjectNode::new(":app", ProjectRole::Application).depends_on(":lib"),
        ProjectNode::new(":lib", ProjectRole::Library),
        ProjectNode::new(":other", ProjectRole::Library),
    ];

    let err = OrderConstraintResolver::new().constrain(&nodes).unwrap_err();
    match &err {
        GraphError::EvaluationCycle { nodes } => {
            assert_eq!(nodes, &vec![":app".to_string(), ":lib".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(":app → :lib"));
}

#[test]
fn test_longer_explicit_cycle_names_all_members() {
    let nodes = vec![
        ProjectNode::root("r"),
        ProjectNode::new(":a", ProjectRole::Library).depends_on(":b"),
        ProjectNode::new(":b", ProjectRole::Library).depends_on(":c"),
        ProjectNode::new(":c", ProjectRole::Library).depends_on(":a"),
        ProjectNode::new(":d", ProjectRole::Library),
    ];

    let err = OrderConstraintResolver::new().constrain(&nodes).unwrap_err();
    match err {
        GraphError::EvaluationCycle { nodes } => assert_eq!(nodes, vec![":a", ":b", ":c"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_explicit_dependencies_extend_the_policy() {
    let mut nodes = nodes();
    nodes[1] = ProjectNode::new(":l1", ProjectRole::Library).depends_on(":l2");

    let constraints = OrderConstraintResolver::new().constrain(&nodes).unwrap();
    assert!(constraints.edges.contains(&EvaluationEdge::new(":l1", ":l2")));
    assert_eq!(constraints.order, vec![":", ":app", ":l2", ":l1"]);
}

#[test]
fn test_duplicate_declarations_do_not_duplicate_edges() {
    let mut nodes = nodes();
    nodes[1] = ProjectNode::new(":l1", ProjectRole::Library).depends_on(":app");

    let constraints = OrderConstraintResolver::new().constrain(&nodes).unwrap();
    assert_eq!(constraints.edges.len(), 2);
}

#[test]
fn test_unknown_dependency_is_rejected() {
    let mut nodes = nodes();
    nodes.push(ProjectNode::new(":x", ProjectRole::Library).depends_on(":missing"));

    let err = OrderConstraintResolver::new().constrain(&nodes).unwrap_err();
    match err {
        GraphError::UnknownProject {
            path,
            referenced_by,
        } => {
            assert_eq!(path, ":missing");
            assert_eq!(referenced_by, ":x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_multiple_applications_are_rejected() {
    let mut nodes = nodes();
    nodes.push(ProjectNode::new(":app2", ProjectRole::Application));

    let err = OrderConstraintResolver::new().constrain(&nodes).unwrap_err();
    assert!(matches!(err, GraphError::MultipleApplications { .. }));
}

#[test]
fn test_large_flat_graph_resolves() {
    let mut nodes = vec![
        ProjectNode::root("r"),
        ProjectNode::new(":app", ProjectRole::Application),
    ];
    nodes.extend((0..500).map(|i| ProjectNode::new(format!(":lib{i}"), ProjectRole::Library)));

    let constraints = OrderConstraintResolver::new().constrain(&nodes).unwrap();
    assert_eq!(constraints.edges.len(), 500);
    assert_eq!(constraints.order.len(), 502);
    assert_eq!(constraints.order[1], ":app");
}
