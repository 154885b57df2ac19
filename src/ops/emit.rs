//! Writing the generated import files.
//!
//! Two files are written into the root project directory:
//! - `.moor-imports.cmake`: include hooks, search paths, defines and
//!   subdirectories of all imports. Only replaced when its content changes,
//!   so an unchanged import set never triggers a CMake re-run.
//! - `.moor-gen.py`: search paths for code generators, always rewritten.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::core::DependencyGraph;
use crate::ops::merge::{merge, MergedSettings};
use crate::ops::resolve::{resolve, Resolution};
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};
use crate::util::fs::{normalize_path, slash_path, write_if_changed};
use crate::util::template::copy_template_file;
use crate::util::GlobalContext;

/// Generated CMake fragment with the merged imports.
pub const IMPORTS_FILE: &str = ".moor-imports.cmake";

/// Generated generator search path file.
pub const GEN_FILE: &str = ".moor-gen.py";

/// Optional per-project CMake hook included by importers.
pub const INCLUDE_HOOK: &str = "moor-include.cmake";

/// Per-project directory with code generators.
pub const GENERATORS_DIR: &str = "moor-generators";

const GEN_TEMPLATE: &str = r#"#
# generated by 'moor gen', don't edit, don't add to version control!
#
import sys

genpaths = [
$genpaths]

for path in reversed(genpaths):
    if path not in sys.path:
        sys.path.insert(0, path)
"#;

/// Options for writing the import files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Merge and report, but write nothing
    pub dry_run: bool,
}

/// What an emit pass did.
#[derive(Debug, Clone, Default)]
pub struct EmitReport {
    /// Whether the import graph was complete
    pub resolved: bool,
    /// Merged settings, if the graph was complete
    pub settings: Option<MergedSettings>,
    /// Whether `.moor-imports.cmake` was created or replaced
    pub imports_written: bool,
    /// Whether `.moor-gen.py` was written
    pub gen_written: bool,
}

/// Resolve the imports of a project and write its generated files.
pub fn write_imports_files(
    ctx: &GlobalContext,
    project_dir: &Path,
    opts: &EmitOptions,
    diag: &mut Diagnostics,
) -> Result<EmitReport> {
    let project_dir = normalize_path(project_dir);
    let resolution = resolve(ctx, &project_dir, diag);
    emit_resolution(ctx, &project_dir, &resolution, opts, diag)
}

/// Write the generated files for an existing resolution.
///
/// Does nothing but warn when the resolution is incomplete.
pub fn emit_resolution(
    ctx: &GlobalContext,
    project_dir: &Path,
    resolution: &Resolution,
    opts: &EmitOptions,
    diag: &mut Diagnostics,
) -> Result<EmitReport> {
    if !resolution.success {
        diag.report(
            Diagnostic::warning("imports are incomplete, please run 'moor fetch'")
                .with_suggestion(suggestions::RUN_FETCH),
        );
        return Ok(EmitReport::default());
    }

    let settings = merge(ctx, &resolution.graph, diag);
    let mut report = EmitReport {
        resolved: true,
        ..EmitReport::default()
    };

    if !opts.dry_run {
        let fragment = render_imports_fragment(ctx, &resolution.graph, &settings);
        let imports_path = project_dir.join(IMPORTS_FILE);
        report.imports_written = write_if_changed(&imports_path, fragment.as_bytes())?;
        if report.imports_written {
            tracing::info!("Wrote {}", imports_path.display());
        } else {
            tracing::debug!("{} is up to date", imports_path.display());
        }

        let values = HashMap::from([("genpaths", generator_search_paths(ctx, &resolution.graph))]);
        copy_template_file(&ctx.templates_dir(), project_dir, GEN_FILE, GEN_TEMPLATE, &values)?;
        report.gen_written = true;
    }

    report.settings = Some(settings);
    Ok(report)
}

/// Render the content of `.moor-imports.cmake`.
pub fn render_imports_fragment(
    ctx: &GlobalContext,
    graph: &DependencyGraph,
    settings: &MergedSettings,
) -> String {
    let mut out = String::new();
    out.push_str("#\n# generated by 'moor gen', don't edit, don't add to version control!\n#\n");

    for (name, _) in graph.dependencies() {
        let dir = slash_path(&ctx.project_dir(name));
        out.push_str(&format!("if (EXISTS \"{}/{}\")\n", dir, INCLUDE_HOOK));
        out.push_str(&format!("    include(\"{}/{}\")\n", dir, INCLUDE_HOOK));
        out.push_str("endif()\n");
        out.push_str(&format!("if (EXISTS \"{}/lib/${{MOOR_PLATFORM_NAME}}\")\n", dir));
        out.push_str(&format!("    link_directories(\"{}/lib/${{MOOR_PLATFORM_NAME}}\")\n", dir));
        out.push_str("endif()\n");
    }

    for dir in &settings.header_dirs {
        out.push_str(&format!("include_directories(\"{}\")\n", dir));
    }
    for dir in &settings.lib_dirs {
        out.push_str(&format!("link_directories(\"{}\")\n", dir));
    }
    for (name, value) in &settings.defines {
        if value.is_string() {
            let escaped = value.to_string().replace('\\', "\\\\").replace('"', "\\\"");
            out.push_str(&format!("add_definitions(-D{}=\"{}\")\n", name, escaped));
        } else {
            out.push_str(&format!("add_definitions(-D{}={})\n", name, value));
        }
    }

    out.push_str("moor_ide_group(\"Imports\")\n");
    for (src_dir, build_dir) in &settings.modules {
        out.push_str(&format!("add_subdirectory(\"{}\" \"{}\")\n", src_dir, build_dir));
    }
    out.push_str("moor_ide_group(\"\")\n");

    out
}

/// Quoted, comma-terminated generator directories, one per line.
fn generator_search_paths(ctx: &GlobalContext, graph: &DependencyGraph) -> String {
    let mut paths = format!("\"{}\",\n", slash_path(&ctx.generators_dir()));
    for name in graph.names() {
        let gen_dir = ctx.project_dir(name).join(GENERATORS_DIR);
        if gen_dir.is_dir() {
            paths.push_str(&format!("\"{}\",\n", slash_path(&gen_dir)));
        }
    }
    paths
}
