//! Fetching imports into the workspace.
//!
//! Clones every transitive import that is not present yet. Existing
//! directories are used as they are: this pass never pulls or checks out
//! anything in a project that is already there.

use std::path::Path;

use indexmap::IndexSet;

use crate::core::manifest::get_imports;
use crate::core::workspace::project_name;
use crate::sources::Vcs;
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};
use crate::util::fs::{normalize_path, remove_dir_all_if_exists};
use crate::util::GlobalContext;

/// Summary of a fetch pass.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Projects whose imports were processed, in visit order
    pub visited: IndexSet<String>,
    /// Projects cloned by this pass
    pub cloned: Vec<String>,
    /// Projects that failed to clone
    pub failed: Vec<String>,
}

impl FetchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Clone all missing imports of a project, recursively.
pub fn fetch(
    ctx: &GlobalContext,
    project_dir: &Path,
    vcs: &dyn Vcs,
    diag: &mut Diagnostics,
) -> FetchReport {
    let project_dir = normalize_path(project_dir);
    let mut report = FetchReport::default();

    visit(ctx, &project_dir, vcs, &mut report, diag);

    tracing::info!(
        "Fetched {} project(s), {} failed",
        report.cloned.len(),
        report.failed.len()
    );
    report
}

fn visit(
    ctx: &GlobalContext,
    project_dir: &Path,
    vcs: &dyn Vcs,
    report: &mut FetchReport,
    diag: &mut Diagnostics,
) {
    let name = project_name(project_dir);
    if !report.visited.insert(name) {
        return;
    }

    let imports = match get_imports(ctx.registry(), project_dir, diag) {
        Ok(imports) => imports,
        Err(e) => {
            diag.error(format!("{:#}", anyhow::Error::from(e)));
            return;
        }
    };

    for (dep_name, spec) in &imports {
        if report.visited.contains(dep_name) {
            continue;
        }

        let dep_dir = ctx.project_dir(dep_name);
        tracing::info!("=== dependency: '{}'", dep_name);

        let ready = if dep_dir.is_dir() {
            tracing::info!("dir '{}' exists", dep_dir.display());
            true
        } else {
            match vcs.clone_repo(&spec.git, &spec.branch, dep_name, ctx.workspace_dir()) {
                Ok(()) => {
                    report.cloned.push(dep_name.clone());
                    true
                }
                Err(e) => {
                    diag.report(
                        Diagnostic::error(format!(
                            "failed to git clone {} into {}",
                            spec.git,
                            dep_dir.display()
                        ))
                        .with_context(format!("{:#}", e))
                        .with_suggestion(format!(
                            "help: Check that branch or tag `{}` exists and the URL is reachable",
                            spec.branch
                        )),
                    );
                    // a half-finished clone would be taken as fetched next time
                    if let Err(e) = remove_dir_all_if_exists(&dep_dir) {
                        diag.warn(format!("{:#}", e));
                    }
                    report.failed.push(dep_name.clone());
                    false
                }
            }
        };

        if ready {
            visit(ctx, &dep_dir, vcs, report, diag);
        }
    }
}

/// Report imports that are still missing after a failed fetch.
pub fn missing_hint(report: &FetchReport) -> Option<Diagnostic> {
    if report.is_success() {
        return None;
    }
    Some(
        Diagnostic::warning(format!(
            "{} import(s) could not be fetched: {}",
            report.failed.len(),
            report.failed.join(", ")
        ))
        .with_suggestion(suggestions::RUN_FETCH),
    )
}
