//! Project tree description (`projgraph.toml`)
//!
//! ```toml
//! [root]
//! name = "case100"
//! build_dir = "../build"
//!
//! [defaults.namespaces]
//! "dev.isar.isar_flutter_libs" = "dev.isar.isar_flutter_libs"
//!
//! [[project]]
//! path = ":app"
//! role = "application"
//! namespace = "com.sensor.case100"
//!
//! [project.build_types.release]
//! signing_config = "debug"
//!
//! [[project]]
//! path = ":isar_flutter_libs"
//! role = "library"
//! group = "dev.isar.isar_flutter_libs"
//! ```

use super::GraphError;
use super::directories::{DEFAULT_BUILD_DIR, resolve_build_root};
use super::propagation::GraphDefaults;
use crate::primitives::{BuildTypeSettings, ProjectNode, ProjectRole, SdkBounds};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default tree file name, relative to the project directory
pub const DEFAULT_TREE_FILE: &str = "projgraph.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectTree {
    pub root: RootDecl,
    #[serde(default)]
    pub defaults: GraphDefaults,
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootDecl {
    pub name: String,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default)]
    pub group: Option<String>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDecl {
    pub path: String,
    pub role: ProjectRole,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub sdk: SdkBounds,
    #[serde(default)]
    pub jvm_target: Option<String>,
    #[serde(default)]
    pub evaluation_depends_on: Vec<String>,
    #[serde(default)]
    pub build_types: BTreeMap<String, BuildTypeSettings>,
}

impl ProjectDecl {
    pub fn to_node(&self) -> ProjectNode {
        let mut node = ProjectNode::new(self.path.clone(), self.role);
        node.group = self.group.clone();
        node.namespace = self.namespace.clone();
        node.sdk = self.sdk;
        node.jvm_target = self.jvm_target.clone();
        node.evaluation_depends_on = self.evaluation_depends_on.clone();
        node.build_types = self.build_types.clone();
        node
    }
}

impl ProjectTree {
    /// Read and parse a tree file
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::TreeRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tree: Self = toml::from_str(&content).map_err(|e| GraphError::TreeParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(
            file = %path.display(),
            projects = tree.projects.len(),
            "project tree loaded"
        );
        Ok(tree)
    }

    pub fn root_node(&self) -> ProjectNode {
        let mut root = ProjectNode::root(self.root.name.clone());
        root.group = self.root.group.clone();
        root
    }

    /// Subproject nodes in declaration order, unvalidated
    pub fn subproject_nodes(&self) -> Vec<ProjectNode> {
        self.projects.iter().map(ProjectDecl::to_node).collect()
    }

    /// Redirected output directory of the root project
    pub fn build_root(&self, project_dir: &Path) -> PathBuf {
        resolve_build_root(project_dir, &self.root.build_dir)
    }
}

#[cfg(test)]
mod tests {
    include!("tree.test.rs");
}
