//! Merging exported settings across the dependency graph.
//!
//! For every visited project and every project it imports, the imported
//! project's exports are folded into one flat set of search paths, defines
//! and modules. Traversal follows graph order, so the first project to
//! export a define decides its value.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

use crate::core::{DefineValue, DependencyGraph};
use crate::util::diagnostic::{Diagnostic, Diagnostics};
use crate::util::fs::slash_path;
use crate::util::GlobalContext;

/// Flattened exports of all imported projects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSettings {
    /// Absolute header search paths
    pub header_dirs: IndexSet<String>,
    /// Absolute library search paths
    pub lib_dirs: IndexSet<String>,
    /// Preprocessor defines
    pub defines: IndexMap<String, DefineValue>,
    /// Absolute module source dir -> build subdirectory name
    pub modules: IndexMap<String, String>,
}

#[derive(Clone, Copy)]
enum SearchPathKind {
    Header,
    Lib,
}

impl SearchPathKind {
    fn label(self) -> &'static str {
        match self {
            SearchPathKind::Header => "header",
            SearchPathKind::Lib => "lib",
        }
    }
}

/// Merge the exports of every import in the graph.
pub fn merge(ctx: &GlobalContext, graph: &DependencyGraph, diag: &mut Diagnostics) -> MergedSettings {
    let mut merged = MergedSettings::default();

    for (proj_name, proj) in graph.iter() {
        for imp_name in proj.imports.keys() {
            let Some(imported) = graph.get(imp_name) else {
                tracing::debug!("`{}` is not in the graph, skipping its exports", imp_name);
                continue;
            };
            let exports = &imported.exports;
            let imp_dir = ctx.project_dir(imp_name);

            for dir in &exports.header_dirs {
                add_search_path(
                    &mut merged.header_dirs,
                    slash_path(&imp_dir.join(dir)),
                    imp_name,
                    SearchPathKind::Header,
                    diag,
                );
            }

            for dir in &exports.lib_dirs {
                add_search_path(
                    &mut merged.lib_dirs,
                    slash_path(&imp_dir.join(dir)),
                    imp_name,
                    SearchPathKind::Lib,
                    diag,
                );
            }

            for (name, value) in &exports.defines {
                match merged.defines.entry(name.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(value.clone());
                    }
                    Entry::Occupied(first) if first.get() != value => {
                        let first = first.get();
                        diag.report(
                            Diagnostic::warning(format!(
                                "define '{}={}' exported by '{}' collides with '{}={}' from an earlier import",
                                name, value, imp_name, name, first
                            ))
                            .with_context(format!("imported by '{}'", proj_name))
                            .with_context(format!("keeping '{}={}'", name, first)),
                        );
                    }
                    Entry::Occupied(_) => {}
                }
            }

            for (module, rel_dir) in &exports.modules {
                let src_dir = slash_path(&imp_dir.join(rel_dir));
                merged
                    .modules
                    .entry(src_dir)
                    .or_insert_with(|| format!("{}_{}", imp_name, module));
            }
        }
    }

    merged
}

fn add_search_path(
    paths: &mut IndexSet<String>,
    path: String,
    project: &str,
    kind: SearchPathKind,
    diag: &mut Diagnostics,
) {
    if paths.contains(&path) {
        return;
    }
    if !std::path::Path::new(&path).is_dir() {
        diag.warn(format!(
            "{} search path '{}' not found in project '{}'",
            kind.label(),
            path,
            project
        ));
    }
    paths.insert(path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::resolve::resolve;
    use crate::test_support::{imports_manifest, WorkspaceFixture};

    fn merged(ws: &WorkspaceFixture, root: &str, diag: &mut Diagnostics) -> MergedSettings {
        let dir = ws.project_dir(root);
        let ctx = ws.context(&dir);
        let res = resolve(&ctx, &dir, diag);
        assert!(res.success);
        merge(&ctx, &res.graph, diag)
    }

    #[test]
    fn test_diamond_exports_appear_once() {
        let ws = WorkspaceFixture::new();
        ws.project("a", &imports_manifest(&["b", "c"]));
        ws.project("b", &imports_manifest(&["d"]));
        ws.project("c", &imports_manifest(&["d"]));
        ws.project(
            "d",
            "[exports]\nheader-dirs = [\"include\"]\nlib-dirs = [\"lib\"]\n",
        );
        ws.dir("d/include");
        ws.dir("d/lib");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);

        let d = slash_path(&ws.project_dir("d"));
        assert_eq!(
            settings.header_dirs.iter().collect::<Vec<_>>(),
            vec![&format!("{}/include", d)]
        );
        assert_eq!(
            settings.lib_dirs.iter().collect::<Vec<_>>(),
            vec![&format!("{}/lib", d)]
        );
        assert_eq!(diag.warning_count(), 0);
    }

    #[test]
    fn test_define_collision_keeps_first() {
        let ws = WorkspaceFixture::new();
        ws.project("a", &imports_manifest(&["b", "c"]));
        ws.project("b", "[exports.defines]\nFOO = 1\nNAME = \"b\"\n");
        ws.project("c", "[exports.defines]\nFOO = 2\nNAME = \"b\"\nBAR = true\n");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);

        assert_eq!(settings.defines["FOO"], DefineValue::Integer(1));
        assert_eq!(settings.defines["BAR"], DefineValue::Boolean(true));
        let keys: Vec<_> = settings.defines.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["FOO", "NAME", "BAR"]);

        // identical values do not warn
        assert_eq!(diag.warning_count(), 1);
        let warning = diag.warnings().next().unwrap();
        assert!(warning.message.contains("FOO=2"));
        assert!(warning.message.contains("FOO=1"));
    }

    #[test]
    fn test_missing_search_path_warns_but_is_kept() {
        let ws = WorkspaceFixture::new();
        ws.project("a", &imports_manifest(&["b"]));
        ws.project("b", "[exports]\nheader-dirs = [\"nope\"]\n");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);

        assert_eq!(settings.header_dirs.len(), 1);
        assert_eq!(diag.warning_count(), 1);
        assert!(diag.warnings().next().unwrap().message.contains("header search path"));
    }

    #[test]
    fn test_missing_search_path_warns_once_per_path() {
        let ws = WorkspaceFixture::new();
        ws.project("a", &imports_manifest(&["b", "c"]));
        ws.project("b", &imports_manifest(&["d"]));
        ws.project("c", &imports_manifest(&["d"]));
        ws.project("d", "[exports]\nheader-dirs = [\"nope\"]\n");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);

        assert_eq!(settings.header_dirs.len(), 1);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn test_modules_are_named_after_importer_and_deduplicated() {
        let ws = WorkspaceFixture::new();
        ws.project("a", &imports_manifest(&["b", "c"]));
        ws.project(
            "b",
            &format!(
                "{}[exports.modules]\ncore = \"src/core\"\nutil = \"src/util\"\n",
                imports_manifest(&["c"])
            ),
        );
        ws.project("c", "[exports.modules]\ngfx = \"gfx\"\n");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);

        let b = slash_path(&ws.project_dir("b"));
        let c = slash_path(&ws.project_dir("c"));
        let modules: Vec<_> = settings
            .modules
            .iter()
            .map(|(src, build)| (src.clone(), build.clone()))
            .collect();
        assert_eq!(
            modules,
            vec![
                (format!("{}/src/core", b), "b_core".to_string()),
                (format!("{}/src/util", b), "b_util".to_string()),
                (format!("{}/gfx", c), "c_gfx".to_string()),
            ]
        );
    }

    #[test]
    fn test_root_exports_are_not_merged() {
        let ws = WorkspaceFixture::new();
        ws.project("a", "[exports]\nheader-dirs = [\"include\"]\n");
        let mut diag = Diagnostics::new();

        let settings = merged(&ws, "a", &mut diag);
        assert_eq!(settings, MergedSettings::default());
    }
}
