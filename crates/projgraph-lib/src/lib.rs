//! # projgraph Library
//!
//! Configuration graph for multi-project builds: locate the external tool
//! SDK, plan collision-free output directories, derive evaluate-after
//! constraints, and fill in inherited defaults without overwriting anything a
//! project declared itself.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Project data model, shared enums, and errors
//! - [`graph`] - Tool lookup, directory planning, ordering, and propagation
//! - [`logger`] - Structured logging with progress-aware writers
//! - [`application`] - CLI interface, configuration, and command execution
//!
//! ## Quick Start
//!
//! ```no_run
//! use projgraph_lib::{GraphSettings, ProjectGraph};
//!
//! let graph = ProjectGraph::load(&GraphSettings::new("android")).unwrap();
//! for node in graph.evaluation_order() {
//!     println!("{} -> {:?}", node.path, node.output_dir);
//! }
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod primitives;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use graph::{GraphError, GraphSettings, ProjectGraph};
pub use logger::Logger;
pub use primitives::{
    ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat,
    ProjectNode, ProjectRole, ToolLocation,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Dotenv values must be in the environment before clap reads PROJGRAPH_*
    application::load_env_files()?;

    let config = CliConfig::load();
    execute_command(config)
}
