//! Configuration loading
//!
//! Coordinates the configuration sources in precedence order:
//! defaults -> `.env.local`/`.env` -> environment -> CLI arguments.

use crate::primitives::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Dotenv files read at startup, most specific first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load dotenv files from the current directory.
///
/// Missing files are skipped. Variables already present in the process
/// environment are never overwritten, so `.env.local` wins over `.env`.
pub fn load_env_files() -> Result<Vec<PathBuf>, ConfigError> {
    load_env_files_in(&std::env::current_dir()?)
}

/// Load dotenv files from `dir`; returns the files that were read
pub fn load_env_files_in(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();
    for env_file in ENV_FILES {
        let path = dir.join(env_file);
        match dotenvy::from_path(&path) {
            Ok(()) => {
                debug!(file = %path.display(), "environment file loaded");
                loaded.push(path);
            }
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: path.display().to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(loaded)
}

impl AppConfig {
    /// Layer the standard environment and parsed CLI values over the defaults
    pub fn from_sources(cli: AppConfig) -> Result<Self, ConfigError> {
        Self::from_parts(EnvironmentConfig::load()?, cli)
    }

    /// Same as [`AppConfig::from_sources`] with an explicit environment
    pub fn from_parts(env: EnvironmentConfig, cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
