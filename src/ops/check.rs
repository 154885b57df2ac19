//! Read-only sync check of a project's imports.
//!
//! Reports which imports are missing, which have diverged from their
//! remote, and any warnings the merge step would produce. Nothing in the
//! workspace is modified.

use std::path::Path;

use anyhow::Result;

use crate::core::DependencyGraph;
use crate::ops::emit::{emit_resolution, EmitOptions, EmitReport};
use crate::ops::resolve::resolve;
use crate::sources::Vcs;
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};
use crate::util::fs::normalize_path;
use crate::util::GlobalContext;

/// Outcome of a sync check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Whether the import graph was complete
    pub resolved: bool,
    /// Imports with no directory in the workspace
    pub missing: Vec<String>,
    /// Imports that are dirty or ahead/behind their remote
    pub out_of_sync: Vec<String>,
    /// Imports in sync with their remote
    pub up_to_date: Vec<String>,
    /// Dry-run emission, for merge warnings
    pub emit: EmitReport,
}

/// Check the sync state of every import of a project.
///
/// Runs against the partial graph when resolution fails, so every import
/// reached before the failure is still checked.
pub fn check_imports(
    ctx: &GlobalContext,
    project_dir: &Path,
    vcs: &dyn Vcs,
    diag: &mut Diagnostics,
) -> Result<CheckReport> {
    let project_dir = normalize_path(project_dir);
    let resolution = resolve(ctx, &project_dir, diag);
    let mut report = CheckReport {
        resolved: resolution.success,
        ..CheckReport::default()
    };

    check_dependencies(ctx, &resolution.graph, vcs, &mut report, diag);

    if resolution.success && resolution.graph.dependencies().next().is_none() {
        diag.note("none");
    }

    report.emit = emit_resolution(
        ctx,
        &project_dir,
        &resolution,
        &EmitOptions { dry_run: true },
        diag,
    )?;

    Ok(report)
}

/// Query the sync state of every non-root project in `graph`.
///
/// Directories are checked again here since the workspace may change after
/// the graph was resolved.
fn check_dependencies(
    ctx: &GlobalContext,
    graph: &DependencyGraph,
    vcs: &dyn Vcs,
    report: &mut CheckReport,
    diag: &mut Diagnostics,
) {
    for (name, _) in graph.dependencies() {
        let dir = ctx.project_dir(name);
        if !dir.is_dir() {
            diag.report(
                Diagnostic::warning(format!("'{}' does not exist, please run 'moor fetch'", name))
                    .with_location(&dir)
                    .with_suggestion(suggestions::RUN_FETCH),
            );
            report.missing.push(name.to_string());
            continue;
        }

        match vcs.is_out_of_sync(&dir) {
            Ok(true) => {
                diag.warn(format!(
                    "'{}' is out of sync with its git remote (uncommitted, unpushed or unpulled changes)",
                    dir.display()
                ));
                report.out_of_sync.push(name.to_string());
            }
            Ok(false) => {
                diag.note(format!("'{}': up to date", name));
                report.up_to_date.push(name.to_string());
            }
            Err(e) => {
                diag.report(
                    Diagnostic::warning(format!("could not check sync state of '{}'", name))
                        .with_context(format!("{:#}", e))
                        .with_location(&dir),
                );
                report.out_of_sync.push(name.to_string());
            }
        }
    }
}
