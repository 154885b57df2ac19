//! `moor gen` command

use anyhow::Result;

use super::{finish, project_context};
use crate::cli::{GenArgs, GlobalArgs};
use moor::ops::emit::IMPORTS_FILE;
use moor::ops::{write_imports_files, EmitOptions};
use moor::Diagnostics;

pub fn execute(global: &GlobalArgs, args: GenArgs) -> Result<()> {
    let (ctx, project_dir) = project_context(global, args.path.as_deref())?;
    let mut diag = Diagnostics::new();

    let opts = EmitOptions {
        dry_run: args.dry_run,
    };
    let report = write_imports_files(&ctx, &project_dir, &opts, &mut diag)?;

    if report.resolved && !args.dry_run && !report.imports_written {
        eprintln!("    Unchanged {}", IMPORTS_FILE);
    }

    finish("gen", &diag)
}
