//! Test fixtures for on-disk workspaces.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::MANIFEST_NAME;
use crate::util::fs::normalize_path;
use crate::util::GlobalContext;

/// A temporary workspace plus an isolated tool home.
///
/// Layout:
/// ```text
/// <tmp>/home/          tool home (registry, generators, templates)
/// <tmp>/ws/<project>/  projects side by side
/// ```
pub struct WorkspaceFixture {
    _tmp: TempDir,
    root: PathBuf,
    home: PathBuf,
}

impl WorkspaceFixture {
    /// Create an empty workspace.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let base = normalize_path(tmp.path());
        let root = base.join("ws");
        let home = base.join("home");
        std::fs::create_dir_all(&root).expect("failed to create workspace dir");
        std::fs::create_dir_all(&home).expect("failed to create home dir");

        WorkspaceFixture {
            _tmp: tmp,
            root,
            home,
        }
    }

    /// The workspace directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The tool home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Directory of a project (which may not exist).
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create a project with the given manifest.
    pub fn project(&self, name: &str, manifest: &str) -> PathBuf {
        let dir = self.project_dir(name);
        std::fs::create_dir_all(&dir).expect("failed to create project dir");
        std::fs::write(dir.join(MANIFEST_NAME), manifest).expect("failed to write manifest");
        dir
    }

    /// Create a directory relative to the workspace root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.root.join(rel);
        std::fs::create_dir_all(&dir).expect("failed to create dir");
        dir
    }

    /// Write a file relative to the tool home.
    pub fn home_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.home.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create dir");
        }
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Context for running operations on a project of this workspace.
    pub fn context(&self, project_dir: &Path) -> GlobalContext {
        GlobalContext::with_home(self.home.clone(), project_dir)
            .expect("failed to create context")
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest importing the given projects from `https://example.com/<name>.git`.
pub fn imports_manifest(deps: &[&str]) -> String {
    let mut manifest = String::new();
    for dep in deps {
        manifest.push_str(&format!(
            "[imports.{dep}]\ngit = \"https://example.com/{dep}.git\"\n\n"
        ));
    }
    manifest
}

/// Git URL used by [`imports_manifest`] for a project.
pub fn example_url(name: &str) -> String {
    format!("https://example.com/{}.git", name)
}
