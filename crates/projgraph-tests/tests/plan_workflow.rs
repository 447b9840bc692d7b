//! End-to-end graph resolution over realistic trees

use anyhow::Result;
use projgraph_lib::application::Commands;
use projgraph_lib::primitives::{ConfigField, OutputFormat, SdkBounds, ToolProvenance};
use projgraph_tests::TestEnvironment;
use projgraph_tests::fixtures::{NESTED_TREE, PLUGIN_TREE};

#[test]
fn plugin_libraries_receive_inherited_defaults() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let graph = env.load_graph()?;

    let isar = graph.node(":isar_flutter_libs").unwrap();
    assert_eq!(isar.sdk, SdkBounds::new(36, 24, 35));
    assert_eq!(isar.namespace.as_deref(), Some("dev.isar.isar_flutter_libs"));
    assert_eq!(isar.jvm_target.as_deref(), Some("17"));

    // Declared minSdk survives; the rest is filled in
    let provider = graph.node(":path_provider_android").unwrap();
    assert_eq!(provider.sdk, SdkBounds::new(36, 21, 35));
    assert_eq!(
        provider.namespace.as_deref(),
        Some("io.flutter.plugins.pathprovider")
    );
    Ok(())
}

#[test]
fn empty_namespace_without_mapping_stays_empty() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let graph = env.load_graph()?;

    let sqflite = graph.node(":sqflite_android").unwrap();
    assert_eq!(sqflite.namespace.as_deref(), Some(""));
    assert!(!sqflite
        .defaulted
        .iter()
        .any(|d| d.field == ConfigField::Namespace));
    Ok(())
}

#[test]
fn application_is_never_defaulted() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let graph = env.load_graph()?;

    let app = graph.node(":app").unwrap();
    assert!(app.defaulted.is_empty());
    assert_eq!(
        app.build_types["release"].signing_config.as_deref(),
        Some("debug")
    );
    assert!(graph.root().defaulted.is_empty());
    Ok(())
}

#[test]
fn every_library_waits_for_the_application() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let graph = env.load_graph()?;

    for path in [":isar_flutter_libs", ":path_provider_android", ":sqflite_android"] {
        assert_eq!(graph.ready_after(path), vec![":app"], "{path}");
    }
    assert!(graph.ready_after(":").is_empty());

    let order: Vec<&str> = graph.evaluation_order().map(|n| n.path.as_str()).collect();
    assert_eq!(order[0], ":");
    assert_eq!(order[1], ":app");
    Ok(())
}

#[test]
fn nested_modules_respect_declared_ordering() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(NESTED_TREE)?.with_local_sdk()?;
    let graph = env.load_graph()?;

    let order: Vec<&str> = graph.evaluation_order().map(|n| n.path.as_str()).collect();
    let position = |p: &str| order.iter().position(|o| *o == p).unwrap();
    assert!(position(":feature") < position(":feature:auth"));
    assert!(position(":feature:auth") < position(":feature:billing"));

    let billing = graph.node(":feature:billing").unwrap();
    assert_eq!(
        billing.output_dir.as_deref(),
        Some(env.build_root().join("billing").as_path())
    );
    Ok(())
}

#[test]
fn plan_report_points_at_the_plugin_build() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let report = env.run_json(Commands::Plan)?;

    assert_eq!(report["tool"]["provenance"], "FileConfig");
    assert_eq!(
        report["plugin_build_dir"],
        env.sdk_dir
            .join("packages/flutter_tools/gradle")
            .display()
            .to_string()
    );
    assert_eq!(report["projects"].as_array().unwrap().len(), 5);
    Ok(())
}

#[test]
fn relative_sdk_path_resolves_against_properties_file() -> Result<()> {
    let env = TestEnvironment::new()?
        .with_tree(PLUGIN_TREE)?
        .with_properties("sdk.path=../sdk\n")?;
    let graph = env.load_graph()?;

    let tool = graph.tool_location();
    assert_eq!(tool.provenance, ToolProvenance::FileConfig);
    assert!(tool.path.is_absolute());
    assert!(tool.plugin_build_dir().is_dir());
    Ok(())
}

#[test]
fn text_plan_marks_defaulted_fields() -> Result<()> {
    let env = TestEnvironment::new()?.with_tree(PLUGIN_TREE)?.with_local_sdk()?;
    let output = env.run(Commands::Plan, OutputFormat::Text)?;

    assert!(output.contains("(default: group-namespace:dev.isar.isar_flutter_libs)"));
    assert!(output.contains("minSdk     21\n"));
    Ok(())
}
