//! Workspace layout.
//!
//! A workspace is the directory holding the root project and every fetched
//! dependency side by side. Each project lives in `{workspace}/{name}` and is
//! identified by its directory name.

use std::path::{Path, PathBuf};

/// Name of the per-project manifest file.
pub const MANIFEST_NAME: &str = "Moor.toml";

/// The directory that holds the root project and all of its dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    /// Get the workspace directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the local directory of a project by name.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Get the project name from its directory.
pub fn project_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| project_dir.to_string_lossy().into_owned())
}

/// Get the manifest path of a project directory.
pub fn manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_NAME)
}

/// Check that a directory exists and contains a manifest.
pub fn is_valid_project_dir(project_dir: &Path) -> bool {
    project_dir.is_dir() && manifest_path(project_dir).is_file()
}

/// Find the nearest project root, starting at `start` and searching upward.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if is_valid_project_dir(&current) {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}
