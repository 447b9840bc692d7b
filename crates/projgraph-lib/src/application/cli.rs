use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// projgraph CLI - project graph configuration for multi-project builds
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "projgraph")]
#[command(about = "Resolve the configuration graph of a multi-project build")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// projgraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    ///
    /// Exits the process on invalid arguments, like any clap parser.
    pub fn load() -> Self {
        Self::from(Cli::parse())
    }

    /// Parse an explicit argument list
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from)
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available projgraph commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Resolve the graph and show every project's final configuration
    Plan,

    /// Show evaluation order and evaluate-after edges
    Order,

    /// Show where the external tool SDK was found
    Locate,

    /// Create the planned output directories
    Materialize {
        /// Remove the root build directory first
        #[arg(long, help = "Clean the root build directory before creating directories")]
        clean: bool,
    },

    /// Delete the root build directory
    Clean,

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
