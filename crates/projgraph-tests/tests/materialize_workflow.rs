//! Directory materialization and cleanup against a real filesystem

use anyhow::Result;
use projgraph_lib::application::Commands;
use projgraph_lib::graph::materialize::RecordingMaterializer;
use projgraph_lib::primitives::OutputFormat;
use projgraph_tests::TestEnvironment;
use projgraph_tests::fixtures::PLUGIN_TREE;
use std::fs;

#[test]
fn materialize_creates_one_directory_per_project() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let result = env.run_json(Commands::Materialize { clean: false })?;

    assert_eq!(result["cleaned"], false);
    assert_eq!(result["created"].as_array().unwrap().len(), 5);
    for name in ["app", "isar_flutter_libs", "path_provider_android", "sqflite_android"] {
        assert!(env.build_root().join(name).is_dir(), "{name}");
    }
    // Nothing lands inside the project directory itself
    assert!(!env.project_dir.join("build").exists());
    Ok(())
}

#[test]
fn materialize_is_repeatable() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    env.run(Commands::Materialize { clean: false }, OutputFormat::Text)?;
    env.run(Commands::Materialize { clean: false }, OutputFormat::Text)?;

    assert!(env.build_root().join("app").is_dir());
    Ok(())
}

#[test]
fn clean_before_materialize_drops_stale_outputs() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let stale = env.build_root().join("removed_plugin");
    fs::create_dir_all(&stale)?;

    let result = env.run_json(Commands::Materialize { clean: true })?;

    assert_eq!(result["cleaned"], true);
    assert!(!stale.exists());
    assert!(env.build_root().join("app").is_dir());
    Ok(())
}

#[test]
fn clean_removes_only_the_build_root() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    env.run(Commands::Materialize { clean: false }, OutputFormat::Text)?;

    let result = env.run_json(Commands::Clean)?;

    assert_eq!(result["removed"], true);
    assert!(!env.build_root().exists());
    assert!(env.project_dir.join("projgraph.toml").exists());
    assert!(env.sdk_dir.exists());
    Ok(())
}

#[test]
fn failed_directory_creation_is_reported() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let denied = env.build_root().join("isar_flutter_libs");
    let recorder = RecordingMaterializer::failing_on(&denied);

    let err = env
        .run_with(Commands::Materialize { clean: false }, OutputFormat::Text, &recorder)
        .unwrap_err();

    assert!(err.to_string().contains("isar_flutter_libs"));
    assert!(!recorder.created().contains(&denied));
    Ok(())
}
