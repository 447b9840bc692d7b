//! External build-tool SDK lookup
//!
//! Precedence: project-local properties file -> environment variable -> error.
//! There is no guessed fallback location.

use super::GraphError;
use crate::primitives::{ToolLocation, ToolProvenance};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Properties key naming the SDK path
pub const DEFAULT_PROPERTY_KEY: &str = "sdk.path";

/// Environment variable consulted when the properties file has no entry
pub const DEFAULT_ENV_VAR: &str = "TOOL_SDK";

/// Properties file name, relative to the project directory
pub const DEFAULT_PROPERTIES_FILE: &str = "local.properties";

/// Resolves the SDK location from a `key=value` file or the environment
#[derive(Debug, Clone)]
pub struct ExternalToolLocator {
    property_key: String,
}

impl Default for ExternalToolLocator {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_KEY)
    }
}

impl ExternalToolLocator {
    pub fn new(property_key: impl Into<String>) -> Self {
        Self {
            property_key: property_key.into(),
        }
    }

    pub fn property_key(&self) -> &str {
        &self.property_key
    }

    /// Resolve against the process environment
    pub fn resolve(&self, config_file: &Path, env_var: &str) -> Result<ToolLocation, GraphError> {
        self.resolve_with(config_file, env_var, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// Reads only; calling it again with the same inputs yields the same result.
    pub fn resolve_with<F>(
        &self,
        config_file: &Path,
        env_var: &str,
        lookup: F,
    ) -> Result<ToolLocation, GraphError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = self.read_config_file(config_file)? {
            let base = config_file.parent().unwrap_or_else(|| Path::new(""));
            let path = absolutize(base.join(value));
            debug!(
                path = %path.display(),
                file = %config_file.display(),
                "tool location resolved from properties file"
            );
            return Ok(ToolLocation {
                path,
                provenance: ToolProvenance::FileConfig,
            });
        }

        if let Some(value) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
            let path = absolutize(PathBuf::from(value.trim()));
            debug!(path = %path.display(), env_var, "tool location resolved from environment");
            return Ok(ToolLocation {
                path,
                provenance: ToolProvenance::Environment,
            });
        }

        Err(GraphError::ConfigurationMissing {
            file: config_file.to_path_buf(),
            key: self.property_key.clone(),
            env_var: env_var.to_string(),
        })
    }

    fn read_config_file(&self, path: &Path) -> Result<Option<String>, GraphError> {
        if !path.exists() {
            trace!(file = %path.display(), "no properties file");
            return Ok(None);
        }

        let bytes = std::fs::read(path).map_err(|e| GraphError::ToolConfigUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Properties files are often Latin-1; undecodable bytes only spoil their own line
        let content = String::from_utf8_lossy(&bytes);
        Ok(find_property(&content, &self.property_key))
    }
}

/// Value of the first line for `key` in `key=value` lines; empty counts as absent.
///
/// Lines without `=` and lines for other keys are skipped.
pub fn find_property(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.trim().split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn absolutize(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    include!("locator.test.rs");
}
