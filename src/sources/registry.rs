//! Project name registry.
//!
//! Maps well-known project names to git URLs (`url#branch` form). It is only
//! consulted when upgrading obsolete list-style imports; a name missing from
//! the registry is taken as a URL itself.
//!
//! ```toml
//! [projects]
//! sokol = "https://github.com/floooh/sokol.git"
//! oryol = "https://github.com/floooh/oryol.git#legacy"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the registry file inside the tool home directory.
pub const REGISTRY_FILE: &str = "registry.toml";

/// Name-to-URL lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    projects: IndexMap<String, String>,
}

impl Registry {
    /// Load a registry from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse registry: {}", path.display()))
    }

    /// Load a registry, falling back to an empty one if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load registry from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.projects.insert(name.into(), url.into());
    }

    /// Get the URL registered for a name, or the name itself.
    pub fn url_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.projects.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Number of registered projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Extend<(String, String)> for Registry {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.projects.extend(iter);
    }
}
