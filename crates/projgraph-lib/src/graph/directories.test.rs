use super::*;
use crate::primitives::ProjectRole;

fn root() -> ProjectNode {
    ProjectNode::root("case100")
}

#[test]
fn test_plan_assigns_root_and_children() {
    let children = vec![
        ProjectNode::new(":app", ProjectRole::Application),
        ProjectNode::new(":isar_flutter_libs", ProjectRole::Library),
    ];
    let plan = DirectoryPlanner::new()
        .plan(&root(), &children, Path::new("/work/build"))
        .unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan.root(), Path::new("/work/build"));
    assert_eq!(plan.get(":"), Some(Path::new("/work/build")));
    assert_eq!(plan.get(":app"), Some(Path::new("/work/build/app")));
    assert_eq!(
        plan.get(":isar_flutter_libs"),
        Some(Path::new("/work/build/isar_flutter_libs"))
    );
}

#[test]
fn test_distinct_names_get_distinct_directories() {
    let children: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|n| ProjectNode::new(format!(":{n}"), ProjectRole::Library))
        .collect();
    let plan = DirectoryPlanner::new()
        .plan(&root(), &children, Path::new("/out"))
        .unwrap();

    let mut dirs: Vec<&Path> = plan.iter().map(|(_, dir)| dir).collect();
    let total = dirs.len();
    dirs.sort();
    dirs.dedup();
    assert_eq!(dirs.len(), total);
}

#[test]
fn test_same_name_in_different_parents_collides() {
    let children = vec![
        ProjectNode::new(":feature", ProjectRole::Library),
        ProjectNode::new(":feature:util", ProjectRole::Library),
        ProjectNode::new(":core", ProjectRole::Library),
        ProjectNode::new(":core:util", ProjectRole::Library),
    ];
    let err = DirectoryPlanner::new()
        .plan(&root(), &children, Path::new("/out"))
        .unwrap_err();

    match err {
        GraphError::DuplicateOutputDirectory {
            path,
            first,
            second,
        } => {
            assert_eq!(path, PathBuf::from("/out/util"));
            assert_eq!(first, ":feature:util");
            assert_eq!(second, ":core:util");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_children_plans_root_only() {
    let plan = DirectoryPlanner::new()
        .plan(&root(), &[], Path::new("/out"))
        .unwrap();
    assert_eq!(plan.len(), 1);
    assert!(!plan.is_empty());
}

#[test]
fn test_resolve_build_root_folds_parent_components() {
    assert_eq!(
        resolve_build_root(Path::new("/work/mobile/android"), Path::new("../build")),
        PathBuf::from("/work/mobile/build")
    );
    assert_eq!(
        resolve_build_root(Path::new("/work/android"), Path::new("./out/../build")),
        PathBuf::from("/work/android/build")
    );
    assert_eq!(
        resolve_build_root(Path::new("/work"), Path::new("/abs/build")),
        PathBuf::from("/abs/build")
    );
    assert_eq!(
        resolve_build_root(Path::new("android"), Path::new("../../build")),
        PathBuf::from("../build")
    );
}
