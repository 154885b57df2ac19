//! Configuration file support for moor.
//!
//! moor reads two configuration files:
//! - Global: `~/.moor/config.toml` (or `$MOOR_HOME/config.toml`)
//! - Project: `<project>/.moor/config.toml`
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [workspace]
//! dir = "/home/me/work"
//!
//! [registry]
//! sokol = "https://github.com/floooh/sokol.git"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// moor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace settings
    pub workspace: WorkspaceConfig,

    /// Extra registry entries (name -> `url#branch`)
    pub registry: IndexMap<String, String>,
}

/// Workspace-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Directory holding the root project and its dependencies.
    /// Defaults to the parent of the project directory.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.workspace.dir.is_some() {
            self.workspace.dir = other.workspace.dir;
        }
        self.registry.extend(other.registry);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`.moor/config.toml`)
/// 2. Global config (`~/.moor/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the default tool home directory (`~/.moor`).
pub fn default_home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".moor"))
}

/// Get the project config path (`.moor/config.toml`).
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".moor").join(CONFIG_FILE)
}
