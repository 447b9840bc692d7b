use super::*;
use crate::primitives::SdkBounds;

fn defaults_with_owner() -> GraphDefaults {
    let mut defaults = GraphDefaults::default();
    defaults
        .namespaces
        .insert("owner.x".to_string(), "owner.x.generated".to_string());
    defaults
}

#[test]
fn test_library_without_sdk_gets_graph_defaults() {
    let defaults = GraphDefaults::default();
    let node = ProjectNode::new(":lib", ProjectRole::Library);

    let node = propagate(node, &defaults.rules());

    assert_eq!(node.sdk, SdkBounds::new(36, 24, 35));
    assert_eq!(node.jvm_target.as_deref(), Some("17"));
}

#[test]
fn test_explicit_sdk_bounds_are_kept() {
    let node = ProjectNode::new(":lib", ProjectRole::Library).with_sdk(SdkBounds {
        compile: Some(34),
        min: None,
        target: Some(33),
    });

    let node = propagate(node, &GraphDefaults::default().rules());

    assert_eq!(node.sdk, SdkBounds::new(34, 24, 33));
    let fields: Vec<ConfigField> = node.defaulted.iter().map(|d| d.field).collect();
    assert_eq!(fields, vec![ConfigField::MinSdk, ConfigField::JvmTarget]);
}

#[test]
fn test_application_sdk_is_not_touched() {
    let node = ProjectNode::new(":app", ProjectRole::Application);
    let node = propagate(node, &GraphDefaults::default().rules());

    assert_eq!(node.sdk, SdkBounds::default());
    // The JVM target rule covers every subproject
    assert_eq!(node.jvm_target.as_deref(), Some("17"));
}

#[test]
fn test_root_receives_nothing() {
    let node = ProjectNode::root("r");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.sdk, SdkBounds::default());
    assert_eq!(node.jvm_target, None);
    assert!(node.defaulted.is_empty());
}

#[test]
fn test_matching_group_gets_namespace() {
    let node = ProjectNode::new(":isar", ProjectRole::Library).with_group("owner.x");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.namespace.as_deref(), Some("owner.x.generated"));
    assert!(node.defaulted.iter().any(|d| d.field == ConfigField::Namespace
        && d.rule == "group-namespace:owner.x"));
}

#[test]
fn test_other_group_namespace_stays_unset() {
    let node = ProjectNode::new(":other", ProjectRole::Library).with_group("owner.y");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.namespace, None);
}

#[test]
fn test_namespace_default_requires_library_role() {
    let node = ProjectNode::new(":app", ProjectRole::Application).with_group("owner.x");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.namespace, None);
}

#[test]
fn test_explicit_namespace_is_never_overwritten() {
    let node = ProjectNode::new(":isar", ProjectRole::Library)
        .with_group("owner.x")
        .with_namespace("custom.ns");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.namespace.as_deref(), Some("custom.ns"));
}

#[test]
fn test_empty_namespace_is_filled() {
    let node = ProjectNode::new(":isar", ProjectRole::Library)
        .with_group("owner.x")
        .with_namespace("");
    let node = propagate(node, &defaults_with_owner().rules());

    assert_eq!(node.namespace.as_deref(), Some("owner.x.generated"));
}

#[test]
fn test_first_applicable_rule_wins() {
    let rules = vec![
        PropagationRule::new(
            "first",
            Predicate::Role(ProjectRole::Library),
            FieldDefault::CompileSdk(30),
        ),
        PropagationRule::new(
            "second",
            Predicate::Role(ProjectRole::Library),
            FieldDefault::CompileSdk(99),
        ),
    ];
    let node = propagate(ProjectNode::new(":lib", ProjectRole::Library), &rules);

    assert_eq!(node.sdk.compile, Some(30));
    assert_eq!(node.defaulted.len(), 1);
    assert_eq!(node.defaulted[0].rule, "first");
}

#[test]
fn test_propagation_is_idempotent() {
    let propagator = DefaultConfigPropagator::from_defaults(&defaults_with_owner());
    let once = propagator.propagate(ProjectNode::new(":lib", ProjectRole::Library).with_group("owner.x"));
    let twice = propagator.propagate(once.clone());

    assert_eq!(once, twice);
}

#[test]
fn test_rule_table_order() {
    let names: Vec<String> = defaults_with_owner()
        .rules()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "library-compile-sdk",
            "library-min-sdk",
            "library-target-sdk",
            "group-namespace:owner.x",
            "subproject-jvm-target",
        ]
    );
}

#[test]
fn test_empty_rule_table_leaves_node_untouched() {
    let propagator = DefaultConfigPropagator::default();
    let node = ProjectNode::new(":lib", ProjectRole::Library);
    assert!(propagator.rules().is_empty());
    assert_eq!(propagator.propagate(node.clone()), node);
}
