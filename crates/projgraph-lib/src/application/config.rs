//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::graph::GraphSettings;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const OUTPUT: &str = "text";
    pub const TREE_FILE: &str = "projgraph.toml";
    pub const PROPERTIES_FILE: &str = "local.properties";
    pub const SDK_KEY: &str = "sdk.path";
    pub const SDK_ENV: &str = "TOOL_SDK";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn output() -> OutputFormat {
        OutputFormat::Text
    }

    pub fn tree_file() -> PathBuf {
        PathBuf::from(defaults::TREE_FILE)
    }

    pub fn properties_file() -> PathBuf {
        PathBuf::from(defaults::PROPERTIES_FILE)
    }

    pub fn sdk_key() -> String {
        defaults::SDK_KEY.to_string()
    }

    pub fn sdk_env() -> String {
        defaults::SDK_ENV.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Project directory holding the tree and properties files
    #[arg(short, long, env = "PROJGRAPH_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Project tree file, relative to the working directory
    #[arg(long = "tree", env = "PROJGRAPH_TREE", default_value = defaults::TREE_FILE)]
    #[serde(default = "default_fns::tree_file")]
    pub tree_file: PathBuf,

    /// Properties file consulted for the tool SDK location
    #[arg(long = "properties", env = "PROJGRAPH_PROPERTIES", default_value = defaults::PROPERTIES_FILE)]
    #[serde(default = "default_fns::properties_file")]
    pub properties_file: PathBuf,

    /// Properties key naming the tool SDK location
    #[arg(long, env = "PROJGRAPH_SDK_KEY", default_value = defaults::SDK_KEY)]
    #[serde(default = "default_fns::sdk_key")]
    pub sdk_key: String,

    /// Environment variable consulted when the properties file has no entry
    #[arg(long, env = "PROJGRAPH_SDK_ENV", default_value = defaults::SDK_ENV)]
    #[serde(default = "default_fns::sdk_env")]
    pub sdk_env: String,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "PROJGRAPH_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log record format (text, json, pretty)
    #[arg(long, env = "PROJGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PROJGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "PROJGRAPH_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Report format (text, json)
    #[arg(short, long, env = "PROJGRAPH_OUTPUT", default_value = defaults::OUTPUT)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            tree_file: default_fns::tree_file(),
            properties_file: default_fns::properties_file(),
            sdk_key: default_fns::sdk_key(),
            sdk_env: default_fns::sdk_env(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output: default_fns::output(),
        }
    }
}

impl AppConfig {
    /// Logger settings with the colour intent resolved against the log stream
    pub fn to_logger_config(&self) -> LoggerConfig {
        let ansi = match self.color {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => {
                let term = match self.log_output {
                    LogOutput::Stderr => console::Term::stderr(),
                    LogOutput::Stdout => console::Term::stdout(),
                };
                term.features().colors_supported()
            }
        };

        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi,
        }
    }

    /// Whether report output on stdout should be styled
    pub fn styled_output(&self) -> bool {
        match (self.output, self.color) {
            (OutputFormat::Json, _) | (_, ColorIntent::Never) => false,
            (_, ColorIntent::Always) => true,
            (_, ColorIntent::Auto) => console::Term::stdout().features().colors_supported(),
        }
    }

    /// Graph input locations for the configured working directory
    pub fn graph_settings(&self) -> Result<GraphSettings, ConfigError> {
        let project_dir = match &self.workdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(GraphSettings {
            tree_file: self.tree_file.clone(),
            properties_file: self.properties_file.clone(),
            property_key: self.sdk_key.clone(),
            sdk_env_var: self.sdk_env.clone(),
            ..GraphSettings::new(project_dir)
        })
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }

        if other.tree_file != default_fns::tree_file() {
            self.tree_file = other.tree_file;
        }
        if other.properties_file != default_fns::properties_file() {
            self.properties_file = other.properties_file;
        }
        if other.sdk_key != default_fns::sdk_key() {
            self.sdk_key = other.sdk_key;
        }
        if other.sdk_env != default_fns::sdk_env() {
            self.sdk_env = other.sdk_env;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }
        if !matches!(other.output, OutputFormat::Text) {
            self.output = other.output;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.workdir.is_none() {
            self.workdir = Some(std::env::current_dir()?);
        }

        if self.sdk_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "sdk key must not be empty".to_string(),
            });
        }
        if self.sdk_env.trim().is_empty() || self.sdk_env.contains('=') {
            return Err(ConfigError::ValidationFailed {
                reason: format!("'{}' is not a usable environment variable name", self.sdk_env),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
