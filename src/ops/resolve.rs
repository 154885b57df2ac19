//! Dependency graph resolution.
//!
//! Walks a project and its transitive imports depth-first, recording each
//! visited project's imports and exports. Nothing is fetched here: every
//! import must already exist in the workspace.

use std::path::Path;

use crate::core::manifest::{get_exports, get_imports};
use crate::core::workspace::{is_valid_project_dir, project_name};
use crate::core::{DependencyGraph, ManifestError, ProjectDeps};
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};
use crate::util::fs::normalize_path;
use crate::util::GlobalContext;

/// Outcome of a resolution pass.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// False if any import was missing or any manifest was broken
    pub success: bool,
    /// Projects visited before the walk finished or stopped
    pub graph: DependencyGraph,
}

/// Resolve the full import graph of a project.
///
/// Stops at the first failure. The graph keeps every project visited up to
/// that point, so callers must check `success` before relying on it being
/// complete.
pub fn resolve(ctx: &GlobalContext, project_dir: &Path, diag: &mut Diagnostics) -> Resolution {
    let project_dir = normalize_path(project_dir);
    let mut graph = DependencyGraph::new();

    let success = visit(ctx, &project_dir, &mut graph, diag);
    tracing::debug!(
        "resolved {} project(s) from {} (success: {})",
        graph.len(),
        project_dir.display(),
        success
    );

    Resolution { success, graph }
}

fn visit(
    ctx: &GlobalContext,
    project_dir: &Path,
    graph: &mut DependencyGraph,
    diag: &mut Diagnostics,
) -> bool {
    let name = project_name(project_dir);
    if graph.contains(&name) {
        return true;
    }

    let loaded = get_imports(ctx.registry(), project_dir, diag)
        .and_then(|imports| get_exports(project_dir).map(|exports| (imports, exports)));
    let (imports, exports) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            let not_a_project = matches!(e, ManifestError::InvalidProject { .. });
            let mut report = Diagnostic::error(format!("{:#}", anyhow::Error::from(e)));
            if not_a_project {
                report = report.with_suggestion(suggestions::NO_MANIFEST);
            }
            diag.report(report);
            return false;
        }
    };

    let dep_names: Vec<String> = imports.keys().cloned().collect();
    graph.insert(name.clone(), ProjectDeps { imports, exports });

    for dep_name in dep_names {
        if graph.contains(&dep_name) {
            continue;
        }

        let dep_dir = ctx.project_dir(&dep_name);
        if !is_valid_project_dir(&dep_dir) {
            diag.report(
                Diagnostic::error(format!(
                    "import `{}` of `{}` has not been fetched",
                    dep_name, name
                ))
                .with_context(format!("expected a project at {}", dep_dir.display()))
                .with_suggestion(suggestions::RUN_FETCH),
            );
            return false;
        }

        if !visit(ctx, &dep_dir, graph, diag) {
            return false;
        }
    }

    true
}
