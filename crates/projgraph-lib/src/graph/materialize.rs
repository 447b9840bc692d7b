//! Filesystem side of the directory plan
//!
//! Only called once a graph has been fully resolved, so a failed build never
//! leaves a half-created layout behind.

use super::GraphError;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Directory operations needed to apply a plan
pub trait DirectoryMaterializer {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMaterializer;

impl DirectoryMaterializer for FsMaterializer {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Delete the root output directory. Returns whether anything was removed.
pub fn clean_build_root(
    build_root: &Path,
    fs: &dyn DirectoryMaterializer,
) -> Result<bool, GraphError> {
    if !fs.exists(build_root) {
        debug!(dir = %build_root.display(), "nothing to clean");
        return Ok(false);
    }
    fs.remove_dir_all(build_root).map_err(|e| GraphError::Materialization {
        path: build_root.to_path_buf(),
        source: e,
    })?;
    info!(dir = %build_root.display(), "build directory removed");
    Ok(true)
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingMaterializer;

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use super::DirectoryMaterializer;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory materializer that records every call
    #[derive(Debug, Default)]
    pub struct RecordingMaterializer {
        existing: RefCell<BTreeSet<PathBuf>>,
        created: RefCell<Vec<PathBuf>>,
        removed: RefCell<Vec<PathBuf>>,
        fail_on: Option<PathBuf>,
    }

    impl RecordingMaterializer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail with `PermissionDenied` when asked to create `path`
        pub fn failing_on(path: impl Into<PathBuf>) -> Self {
            Self {
                fail_on: Some(path.into()),
                ..Self::default()
            }
        }

        pub fn with_existing(self, path: impl Into<PathBuf>) -> Self {
            self.existing.borrow_mut().insert(path.into());
            self
        }

        pub fn created(&self) -> Vec<PathBuf> {
            self.created.borrow().clone()
        }

        pub fn removed(&self) -> Vec<PathBuf> {
            self.removed.borrow().clone()
        }
    }

    impl DirectoryMaterializer for RecordingMaterializer {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.created.borrow_mut().push(path.to_path_buf());
            self.existing.borrow_mut().insert(path.to_path_buf());
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
            self.removed.borrow_mut().push(path.to_path_buf());
            self.existing.borrow_mut().retain(|p| !p.starts_with(path));
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.existing.borrow().contains(path)
        }
    }
}

#[cfg(test)]
mod tests {
    include!("materialize.test.rs");
}
