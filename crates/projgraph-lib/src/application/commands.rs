//! Command execution handlers
//!
//! Every handler writes its report to the supplied writer and touches the
//! filesystem only through a [`DirectoryMaterializer`], so tests can run the
//! full command path against a temp directory or an in-memory recorder.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::graph::{
    DirectoryMaterializer, FsMaterializer, GraphReport, ProjectGraph, ProjectTree,
    clean_build_root,
};
use crate::logger::Logger;
use crate::primitives::{ConfigField, OutputFormat, ProjectNode, ToolLocation};
use anyhow::{Context, Result};
use console::Style;
use serde_json::json;
use std::io::{self, Write};
use tracing::{debug, info};

/// Resolve the configuration, start logging, then run the command on stdout.
///
/// With no subcommand the graph is planned.
pub fn execute_command(config: CliConfig) -> Result<()> {
    let app_config = AppConfig::from_sources(config.app_config)?;
    Logger::init(app_config.to_logger_config())?;

    let command = config.command.unwrap_or(Commands::Plan);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_with(command, &app_config, &FsMaterializer, &mut out)
}

/// Run a command against explicit collaborators (for testing)
pub fn execute_command_with(
    command: Commands,
    config: &AppConfig,
    fs: &dyn DirectoryMaterializer,
    out: &mut dyn Write,
) -> Result<()> {
    debug!(?command, "executing command");
    let palette = Palette::new(config.styled_output());

    match command {
        Commands::Plan => handle_plan(config, &palette, out),
        Commands::Order => handle_order(config, &palette, out),
        Commands::Locate => handle_locate(config, &palette, out),
        Commands::Materialize { clean } => handle_materialize(config, clean, fs, &palette, out),
        Commands::Clean => handle_clean(config, fs, &palette, out),
        Commands::Version => handle_version(config, out),
    }
}

fn load_graph(config: &AppConfig) -> Result<ProjectGraph> {
    let settings = config.graph_settings()?;
    let graph = ProjectGraph::load(&settings).with_context(|| {
        format!(
            "Failed to resolve project graph in {}",
            settings.project_dir.display()
        )
    })?;
    Ok(graph)
}

fn handle_plan(config: &AppConfig, palette: &Palette, out: &mut dyn Write) -> Result<()> {
    let graph = load_graph(config)?;
    let report = graph.report();

    match config.output {
        OutputFormat::Json => write_json(out, &report),
        OutputFormat::Text => render_plan(&report, palette, out),
    }
}

fn handle_order(config: &AppConfig, palette: &Palette, out: &mut dyn Write) -> Result<()> {
    let graph = load_graph(config)?;

    match config.output {
        OutputFormat::Json => {
            let order: Vec<&str> = graph.evaluation_order().map(|n| n.path.as_str()).collect();
            write_json(out, &json!({ "order": order, "edges": graph.edges() }))
        }
        OutputFormat::Text => {
            for (position, node) in graph.evaluation_order().enumerate() {
                let after = graph.ready_after(&node.path);
                write!(out, "{:>3}. {}", position + 1, palette.project(&node.path))?;
                if after.is_empty() {
                    writeln!(out)?;
                } else {
                    writeln!(out, " {}", palette.muted(&format!("after {}", after.join(", "))))?;
                }
            }
            Ok(())
        }
    }
}

fn handle_locate(config: &AppConfig, palette: &Palette, out: &mut dyn Write) -> Result<()> {
    let settings = config.graph_settings()?;
    let tool = settings
        .locator()
        .resolve(&settings.properties_path(), &settings.sdk_env_var)?;
    info!(path = %tool.path.display(), provenance = %tool.provenance, "tool located");

    match config.output {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "path": tool.path,
                "provenance": tool.provenance,
                "plugin_build_dir": tool.plugin_build_dir(),
            }),
        ),
        OutputFormat::Text => render_tool(&tool, palette, out),
    }
}

fn handle_materialize(
    config: &AppConfig,
    clean: bool,
    fs: &dyn DirectoryMaterializer,
    palette: &Palette,
    out: &mut dyn Write,
) -> Result<()> {
    // The graph must resolve completely before anything on disk changes
    let graph = load_graph(config)?;

    let cleaned = clean && clean_build_root(graph.build_root(), fs)?;
    let created = graph.materialize(fs)?;
    info!(directories = created.len(), cleaned, "materialized output directories");

    match config.output {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "build_root": graph.build_root(),
                "cleaned": cleaned,
                "created": created,
            }),
        ),
        OutputFormat::Text => {
            if cleaned {
                writeln!(out, "{} {}", palette.success("removed"), graph.build_root().display())?;
            }
            for dir in &created {
                writeln!(out, "{} {}", palette.success("created"), dir.display())?;
            }
            Ok(())
        }
    }
}

fn handle_clean(
    config: &AppConfig,
    fs: &dyn DirectoryMaterializer,
    palette: &Palette,
    out: &mut dyn Write,
) -> Result<()> {
    let settings = config.graph_settings()?;
    let tree = ProjectTree::load(&settings.tree_path())?;
    let build_root = tree.build_root(&settings.project_dir);
    let removed = clean_build_root(&build_root, fs)?;

    match config.output {
        OutputFormat::Json => write_json(
            out,
            &json!({ "build_root": build_root, "removed": removed }),
        ),
        OutputFormat::Text if removed => {
            writeln!(out, "{} {}", palette.success("removed"), build_root.display())?;
            Ok(())
        }
        OutputFormat::Text => {
            writeln!(out, "{}", palette.muted(&format!("nothing to clean at {}", build_root.display())))?;
            Ok(())
        }
    }
}

fn handle_version(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let name = env!("CARGO_PKG_NAME").trim_end_matches("-lib");
    let version = env!("CARGO_PKG_VERSION");

    match config.output {
        OutputFormat::Json => write_json(out, &json!({ "name": name, "version": version })),
        OutputFormat::Text => {
            writeln!(out, "{} {}", name, version)?;
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

fn render_tool(tool: &ToolLocation, palette: &Palette, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} {} {}",
        palette.label("tool"),
        tool.path.display(),
        palette.muted(&format!("({})", tool.provenance))
    )?;
    writeln!(
        out,
        "{} {}",
        palette.label("plugins"),
        tool.plugin_build_dir().display()
    )?;
    Ok(())
}

fn render_plan(report: &GraphReport<'_>, palette: &Palette, out: &mut dyn Write) -> Result<()> {
    render_tool(report.tool, palette, out)?;
    writeln!(out, "{} {}", palette.label("build"), report.build_root.display())?;

    for node in &report.projects {
        writeln!(out)?;
        writeln!(
            out,
            "{} {} {}",
            palette.project(&node.path),
            node.name,
            palette.muted(&format!("[{}]", node.role))
        )?;
        render_node(node, report, palette, out)?;
    }
    Ok(())
}

fn render_node(
    node: &ProjectNode,
    report: &GraphReport<'_>,
    palette: &Palette,
    out: &mut dyn Write,
) -> Result<()> {
    let mark = |field: ConfigField| {
        node.defaulted
            .iter()
            .find(|d| d.field == field)
            .map(|d| format!(" {}", palette.muted(&format!("(default: {})", d.rule))))
            .unwrap_or_default()
    };

    let mut field = |label: &str, value: String| writeln!(out, "    {:<10} {}", label, value);

    if let Some(group) = &node.group {
        field("group", group.clone())?;
    }
    if let Some(namespace) = &node.namespace {
        field("namespace", format!("{}{}", namespace, mark(ConfigField::Namespace)))?;
    }
    for (label, value, kind) in [
        ("compileSdk", node.sdk.compile, ConfigField::CompileSdk),
        ("minSdk", node.sdk.min, ConfigField::MinSdk),
        ("targetSdk", node.sdk.target, ConfigField::TargetSdk),
    ] {
        if let Some(value) = value {
            field(label, format!("{}{}", value, mark(kind)))?;
        }
    }
    if let Some(jvm) = &node.jvm_target {
        field("jvm", format!("{}{}", jvm, mark(ConfigField::JvmTarget)))?;
    }
    for (name, build_type) in &node.build_types {
        let mut parts = Vec::new();
        if let Some(signing) = &build_type.signing_config {
            parts.push(format!("signing={}", signing));
        }
        parts.push(format!("minify={}", build_type.minify_enabled));
        parts.push(format!("shrink={}", build_type.shrink_resources));
        field(name.as_str(), parts.join(" "))?;
    }
    if let Some(dir) = &node.output_dir {
        field("output", dir.display().to_string())?;
    }

    let after: Vec<&str> = report
        .edges
        .iter()
        .filter(|e| e.dependent == node.path)
        .map(|e| e.dependency.as_str())
        .collect();
    if !after.is_empty() {
        field("after", after.join(", "))?;
    }
    Ok(())
}

/// Semantic styles for text reports
struct Palette {
    enabled: bool,
}

impl Palette {
    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.enabled).apply_to(text).to_string()
    }

    /// Fixed-width heading for the report preamble
    fn label(&self, text: &str) -> String {
        self.paint(Style::new().bold(), &format!("{:<8}", text))
    }

    fn project(&self, text: &str) -> String {
        self.paint(Style::new().cyan().bold(), text)
    }

    fn success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    fn muted(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
