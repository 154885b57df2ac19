//! Command implementations

pub mod diag;
pub mod fetch;
pub mod gen;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::cli::GlobalArgs;
use moor::core::workspace::find_project_root;
use moor::util::diagnostic::suggestions;
use moor::util::fs::normalize_path;
use moor::{Diagnostics, GlobalContext};

/// Locate the project and build its context from the global options.
pub fn project_context(global: &GlobalArgs, path: Option<&Path>) -> Result<(GlobalContext, PathBuf)> {
    let start = match path {
        Some(path) => normalize_path(path),
        None => normalize_path(&std::env::current_dir().context("failed to get current directory")?),
    };

    let project_dir = find_project_root(&start).ok_or_else(|| {
        anyhow!(
            "could not find Moor.toml in {} or any parent directory\n{}",
            start.display(),
            suggestions::NO_MANIFEST
        )
    })?;

    let ctx = match global.home {
        Some(ref home) => GlobalContext::with_home(normalize_path(home), &project_dir)?,
        None => GlobalContext::new(&project_dir)?,
    };
    let ctx = match global.workspace {
        Some(ref dir) => ctx.with_workspace_dir(dir),
        None => ctx,
    };

    tracing::debug!(
        "project {} in workspace {}",
        project_dir.display(),
        ctx.workspace_dir().display()
    );
    Ok((ctx, project_dir))
}

/// Fail the command if any error was reported.
pub fn finish(command: &str, diag: &Diagnostics) -> Result<()> {
    if diag.has_errors() {
        bail!(
            "`moor {}` failed with {} error(s) and {} warning(s)",
            command,
            diag.error_count(),
            diag.warning_count()
        );
    }
    Ok(())
}
