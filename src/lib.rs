//! Moor - git-hosted imports for C/C++ CMake projects
//!
//! This crate provides the core library functionality for moor: reading
//! `Moor.toml` manifests, fetching imports into a shared workspace,
//! resolving the import graph and writing the generated CMake fragment.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for moor unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory version-control client and
/// on-disk workspace fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{DependencyGraph, Exports, ImportSpec, Imports, Workspace};
pub use sources::{GitVcs, Registry, Vcs};
pub use util::context::GlobalContext;
pub use util::diagnostic::{Diagnostic, Diagnostics};
