//! Fatal configuration errors abort before anything is written

use anyhow::Result;
use projgraph_lib::application::Commands;
use projgraph_lib::graph::GraphError;
use projgraph_lib::primitives::OutputFormat;
use projgraph_tests::TestEnvironment;
use projgraph_tests::fixtures::{COLLIDING_TREE, CYCLIC_TREE, PLUGIN_TREE};

#[test]
fn missing_sdk_location_is_fatal() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?;

    let err = env.load_graph().unwrap_err();
    let graph_err = err.downcast_ref::<GraphError>().unwrap();
    assert!(matches!(graph_err, GraphError::ConfigurationMissing { .. }));
    Ok(())
}

#[test]
fn properties_without_the_key_fall_through() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_tree(PLUGIN_TREE)?
        .with_properties("sdk.dir=/android/sdk\nflutter.versionCode=1\n")?;

    let err = env.load_graph().unwrap_err();
    assert!(err.to_string().contains("sdk.path=<path>"));
    Ok(())
}

#[test]
fn colliding_directories_materialize_nothing() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(COLLIDING_TREE)?.with_local_sdk()?;

    let err = env
        .run(Commands::Materialize { clean: false }, OutputFormat::Text)
        .unwrap_err();

    let graph_err = err.downcast_ref::<GraphError>().unwrap();
    match graph_err {
        GraphError::DuplicateOutputDirectory { first, second, .. } => {
            assert_eq!(first, ":core:common");
            assert_eq!(second, ":ui:common");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!env.build_root().exists());
    Ok(())
}

#[test]
fn evaluation_cycle_names_its_members() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(CYCLIC_TREE)?.with_local_sdk()?;

    let err = env.load_graph().unwrap_err();
    match err.downcast_ref::<GraphError>() {
        Some(GraphError::EvaluationCycle { nodes }) => {
            assert_eq!(nodes, &vec![":left".to_string(), ":right".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn malformed_tree_is_reported_with_its_path() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_tree("[root]\nname = \"r\"\nunexpected = 1\n")?
        .with_local_sdk()?;

    let err = env.load_graph().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GraphError>(),
        Some(GraphError::TreeParse { .. })
    ));
    assert!(err.to_string().contains("projgraph.toml"));
    Ok(())
}

#[test]
fn unknown_evaluation_dependency_is_rejected() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_tree(
            "[root]\nname = \"r\"\n[[project]]\npath = \":a\"\nrole = \"library\"\nevaluation_depends_on = [\":ghost\"]\n",
        )?
        .with_local_sdk()?;

    let err = env.load_graph().unwrap_err();
    match err.downcast_ref::<GraphError>() {
        Some(GraphError::UnknownProject { path, referenced_by }) => {
            assert_eq!(path, ":ghost");
            assert_eq!(referenced_by, ":a");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}
