//! Where projects come from.
//!
//! Imports are fetched with a version-control client ([`Vcs`]); the
//! registry resolves bare project names in obsolete import lists.

pub mod git;
pub mod registry;
pub mod vcs;

pub use git::GitVcs;
pub use registry::Registry;
pub use vcs::Vcs;
