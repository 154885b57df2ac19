//! Test utilities and mocks for moor unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use moor::test_support::{MockVcs, WorkspaceFixture};
//!
//! #[test]
//! fn test_example() {
//!     let ws = WorkspaceFixture::new();
//!     let app = ws.project("app", "[imports.lib]\ngit = \"https://example.com/lib.git\"\n");
//!
//!     let mut vcs = MockVcs::new();
//!     vcs.add_remote("https://example.com/lib.git", "");
//!
//!     // Use ws.context(&app) and &vcs in tests...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::core::MANIFEST_NAME;
use crate::sources::Vcs;

pub use fixtures::*;

/// A recorded `clone_repo` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCall {
    pub url: String,
    pub branch: String,
    pub name: String,
    pub dest: PathBuf,
}

/// In-memory version-control client.
///
/// Known remotes are cloned by writing their manifest into `dest/name`.
/// Unknown remotes fail, optionally leaving a half-created directory behind
/// like an interrupted git clone would.
#[derive(Debug, Default)]
pub struct MockVcs {
    remotes: HashMap<String, String>,
    out_of_sync: HashMap<PathBuf, bool>,
    leave_partial_clone: bool,
    clones: RefCell<Vec<CloneCall>>,
    sync_queries: RefCell<Vec<PathBuf>>,
}

impl MockVcs {
    /// Create a mock with no remotes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a remote and the manifest its checkout contains.
    pub fn add_remote(&mut self, url: impl Into<String>, manifest: impl Into<String>) {
        self.remotes.insert(url.into(), manifest.into());
    }

    /// Set the sync status reported for a directory.
    pub fn set_out_of_sync(&mut self, dir: impl Into<PathBuf>, out_of_sync: bool) {
        self.out_of_sync.insert(dir.into(), out_of_sync);
    }

    /// Make failing clones leave their target directory behind.
    pub fn leave_partial_clones(&mut self) {
        self.leave_partial_clone = true;
    }

    /// All clone calls so far.
    pub fn clones(&self) -> Vec<CloneCall> {
        self.clones.borrow().clone()
    }

    /// Number of clone calls so far.
    pub fn clone_count(&self) -> usize {
        self.clones.borrow().len()
    }

    /// Directories whose sync status was queried.
    pub fn sync_queries(&self) -> Vec<PathBuf> {
        self.sync_queries.borrow().clone()
    }
}

impl Vcs for MockVcs {
    fn clone_repo(&self, url: &str, branch: &str, name: &str, dest: &Path) -> Result<()> {
        self.clones.borrow_mut().push(CloneCall {
            url: url.to_string(),
            branch: branch.to_string(),
            name: name.to_string(),
            dest: dest.to_path_buf(),
        });

        let checkout = dest.join(name);
        match self.remotes.get(url) {
            Some(manifest) => {
                std::fs::create_dir_all(&checkout)?;
                std::fs::write(checkout.join(MANIFEST_NAME), manifest)?;
                Ok(())
            }
            None => {
                if self.leave_partial_clone {
                    std::fs::create_dir_all(checkout.join(".git"))?;
                }
                bail!("repository not found: {}", url)
            }
        }
    }

    fn is_out_of_sync(&self, dir: &Path) -> Result<bool> {
        self.sync_queries.borrow_mut().push(dir.to_path_buf());
        self.out_of_sync
            .get(dir)
            .copied()
            .ok_or_else(|| anyhow!("not a git repository: {}", dir.display()))
    }
}
