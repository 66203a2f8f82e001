//! Scoped handle on the destination directory.
//!
//! Every path used by a run is resolved through `WorkDir`; the process's
//! current directory is never changed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    /// Create `root` (and missing parents) if absent. An existing directory is fine.
    pub fn acquire(root: &Path) -> Result<Self, FetchError> {
        fs::create_dir_all(root).map_err(|source| FetchError::Directory {
            path: root.to_path_buf(),
            source,
        })?;
        tracing::debug!(dir = %root.display(), "working directory ready");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` inside the working directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
