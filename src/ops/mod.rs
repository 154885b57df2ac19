//! High-level operations.
//!
//! This module contains the implementation of the moor commands.

pub mod check;
pub mod emit;
pub mod fetch;
pub mod merge;
pub mod resolve;

pub use check::{check_imports, CheckReport};
pub use emit::{write_imports_files, EmitOptions, EmitReport};
pub use fetch::{fetch, missing_hint, FetchReport};
pub use merge::{merge, MergedSettings};
pub use resolve::{resolve, Resolution};
