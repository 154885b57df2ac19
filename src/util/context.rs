//! Global context for moor operations.
//!
//! Bundles the tool home directory, the workspace layout, the merged
//! configuration and the registry. Every resolution pass takes a context
//! instead of reaching for global state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::Workspace;
use crate::sources::registry::{Registry, REGISTRY_FILE};
use crate::util::config::{default_home_dir, load_config, project_config_path, Config, CONFIG_FILE};
use crate::util::fs::normalize_path;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Tool home directory (~/.moor/)
    home: PathBuf,

    /// Workspace holding the root project and its dependencies
    workspace: Workspace,

    /// Merged configuration
    config: Config,

    /// Name-to-URL registry
    registry: Registry,
}

impl GlobalContext {
    /// Create a context for a project, using the default tool home.
    pub fn new(project_dir: &Path) -> Result<Self> {
        let home = default_home_dir().unwrap_or_else(|| PathBuf::from(".moor"));
        Self::with_home(home, project_dir)
    }

    /// Create a context for a project with an explicit tool home.
    pub fn with_home(home: PathBuf, project_dir: &Path) -> Result<Self> {
        let project_dir = normalize_path(project_dir);
        let config = load_config(&home.join(CONFIG_FILE), &project_config_path(&project_dir));

        let workspace_dir = match config.workspace.dir {
            Some(ref dir) => normalize_path(dir),
            None => project_dir
                .parent()
                .map(Path::to_path_buf)
                .with_context(|| {
                    format!(
                        "project directory {} has no parent to use as workspace",
                        project_dir.display()
                    )
                })?,
        };

        let mut registry = Registry::load_or_default(&home.join(REGISTRY_FILE));
        registry.extend(config.registry.clone());

        Ok(GlobalContext {
            home,
            workspace: Workspace::new(workspace_dir),
            config,
            registry,
        })
    }

    /// Override the workspace directory.
    pub fn with_workspace_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workspace = Workspace::new(normalize_path(dir.as_ref()));
        self
    }

    /// Get the tool home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the workspace layout.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Get the workspace directory.
    pub fn workspace_dir(&self) -> &Path {
        self.workspace.root()
    }

    /// Get the local directory of a project by name.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.workspace.project_dir(name)
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Directory with the tool's own code generators.
    pub fn generators_dir(&self) -> PathBuf {
        self.home.join("generators")
    }

    /// Directory with template overrides.
    pub fn templates_dir(&self) -> PathBuf {
        self.home.join("templates")
    }
}
