//! Core data structures for moor.
//!
//! This module contains the foundational types used throughout moor:
//! - Workspace layout and project identity
//! - Manifest imports and exports
//! - The resolved dependency graph

pub mod git_url;
pub mod graph;
pub mod manifest;
pub mod workspace;

pub use graph::{DependencyGraph, ProjectDeps};
pub use manifest::{DefineValue, Exports, ImportSpec, Imports, ManifestError};
pub use workspace::{Workspace, MANIFEST_NAME};
