//! The resolved dependency graph.

use indexmap::IndexMap;

use crate::core::manifest::{Exports, Imports};

/// Declared imports and exports of one visited project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDeps {
    pub imports: Imports,
    pub exports: Exports,
}

/// Visited projects in first-visit order.
///
/// The root project is always the first entry. A project name appears at
/// most once; later visits never replace the first one.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    projects: IndexMap<String, ProjectDeps>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        DependencyGraph {
            projects: IndexMap::new(),
        }
    }

    /// Register a project. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, deps: ProjectDeps) -> bool {
        let name = name.into();
        if self.projects.contains_key(&name) {
            return false;
        }
        self.projects.insert(name, deps);
        true
    }

    /// Check if a project has been visited.
    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    /// Get a visited project.
    pub fn get(&self, name: &str) -> Option<&ProjectDeps> {
        self.projects.get(name)
    }

    /// Name of the root project.
    pub fn root_name(&self) -> Option<&str> {
        self.projects.keys().next().map(String::as_str)
    }

    /// Iterate over all projects in visit order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProjectDeps)> {
        self.projects.iter().map(|(name, deps)| (name.as_str(), deps))
    }

    /// Iterate over every project except the root.
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &ProjectDeps)> {
        self.iter().skip(1)
    }

    /// Project names in visit order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
