//! Output directory planning
//!
//! The root project builds into the redirected root directory and every
//! subproject into `<root>/<name>`. Planning never touches the filesystem.

use super::GraphError;
use crate::primitives::ProjectNode;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Build directory of the root project, relative to the project directory
pub const DEFAULT_BUILD_DIR: &str = "../build";

/// Output directory per project path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryPlan {
    root: PathBuf,
    dirs: BTreeMap<String, PathBuf>,
}

impl DirectoryPlan {
    /// Output directory of the root project
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, project_path: &str) -> Option<&Path> {
        self.dirs.get(project_path).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.dirs.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryPlanner;

impl DirectoryPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Assign `new_root` to `root` and `new_root/<name>` to each child.
    ///
    /// Fails on the first collision, before any directory exists.
    pub fn plan(
        &self,
        root: &ProjectNode,
        children: &[ProjectNode],
        new_root: &Path,
    ) -> Result<DirectoryPlan, GraphError> {
        let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
        let mut dirs = BTreeMap::new();

        claimed.insert(new_root.to_path_buf(), root.path.as_str());
        dirs.insert(root.path.clone(), new_root.to_path_buf());

        for child in children {
            let dir = new_root.join(&child.name);
            if let Some(first) = claimed.get(&dir) {
                return Err(GraphError::DuplicateOutputDirectory {
                    path: dir,
                    first: first.to_string(),
                    second: child.path.clone(),
                });
            }
            trace!(project = %child.path, dir = %dir.display(), "planned output directory");
            claimed.insert(dir.clone(), child.path.as_str());
            dirs.insert(child.path.clone(), dir);
        }

        Ok(DirectoryPlan {
            root: new_root.to_path_buf(),
            dirs,
        })
    }
}

/// Resolve `build_dir` against `project_dir`, folding `.` and `..` lexically
pub fn resolve_build_root(project_dir: &Path, build_dir: &Path) -> PathBuf {
    normalize_lexically(&project_dir.join(build_dir))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    include!("directories.test.rs");
}
