//! `moor fetch` command

use anyhow::Result;

use super::{finish, project_context};
use crate::cli::{GlobalArgs, ProjectArgs};
use moor::ops::{fetch, missing_hint};
use moor::{Diagnostics, GitVcs};

pub fn execute(global: &GlobalArgs, args: ProjectArgs) -> Result<()> {
    let (ctx, project_dir) = project_context(global, args.path.as_deref())?;
    let mut diag = Diagnostics::new();

    let report = fetch(&ctx, &project_dir, &GitVcs::new(), &mut diag);
    if let Some(hint) = missing_hint(&report) {
        diag.report(hint);
    }

    finish("fetch", &diag)
}
