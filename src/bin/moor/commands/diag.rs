//! `moor diag` command

use anyhow::Result;

use super::{finish, project_context};
use crate::cli::{GlobalArgs, ProjectArgs};
use moor::ops::check_imports;
use moor::{Diagnostics, GitVcs};

pub fn execute(global: &GlobalArgs, args: ProjectArgs) -> Result<()> {
    let (ctx, project_dir) = project_context(global, args.path.as_deref())?;
    let mut diag = Diagnostics::new();

    eprintln!("=== imports:");
    let report = check_imports(&ctx, &project_dir, &GitVcs::new(), &mut diag)?;

    eprintln!(
        "    {} up to date, {} out of sync, {} missing",
        report.up_to_date.len(),
        report.out_of_sync.len(),
        report.missing.len()
    );

    finish("diag", &diag)
}
