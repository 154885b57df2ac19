//! Moor.toml manifest access.
//!
//! A manifest declares what a project imports and what it exports to the
//! projects importing it:
//!
//! ```toml
//! [imports.sokol]
//! git = "https://github.com/floooh/sokol.git"
//! branch = "master"
//!
//! [exports]
//! header-dirs = ["include"]
//! lib-dirs = ["lib"]
//!
//! [exports.defines]
//! APP_USE_GL = 1
//!
//! [exports.modules]
//! core = "src/core"
//! ```
//!
//! Older manifests list imports as a bare array (`imports = ["sokol"]`).
//! That form is upgraded on load through the registry.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use serde::Deserialize;
use toml::Table;

use crate::core::git_url::{
    git_branch_from_url, git_url_from_url, is_git_url, project_name_from_url, DEFAULT_BRANCH,
};
use crate::core::workspace::{is_valid_project_dir, manifest_path};
use crate::sources::Registry;
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};

/// Error while loading or interpreting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("`{}` is not a valid project directory", .dir.display())]
    InvalidProject { dir: PathBuf },

    #[error("failed to read manifest {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("imports in `{}` {reason}", .path.display())]
    MalformedImports { path: PathBuf, reason: String },

    #[error("no git URL in import `{import}` in `{}`", .path.display())]
    MissingGitUrl { import: String, path: PathBuf },

    #[error("`{entry}` cannot be resolved into a git url (in `{}`)", .path.display())]
    UnresolvableImport { entry: String, path: PathBuf },

    #[error("exports in `{}` {reason}", .path.display())]
    MalformedExports { path: PathBuf, reason: String },
}

/// Where to get an imported project from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Git URL of the project
    pub git: String,
    /// Branch or tag to check out
    pub branch: String,
}

/// Imports of one project, keyed by project name in declaration order.
pub type Imports = IndexMap<String, ImportSpec>;

/// Value of an exported preprocessor define.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefineValue {
    String(String),
    // before Float, which would also accept integers
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl DefineValue {
    /// Check if the value must be quoted on the command line.
    pub fn is_string(&self) -> bool {
        matches!(self, DefineValue::String(_))
    }
}

impl fmt::Display for DefineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefineValue::String(s) => write!(f, "{}", s),
            DefineValue::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fraction of whole numbers (`1.0`, not `1`)
            DefineValue::Float(v) => write!(f, "{:?}", v),
            DefineValue::Boolean(b) => write!(f, "{}", u8::from(*b)),
        }
    }
}

/// Settings a project makes available to its importers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Exports {
    /// Header search paths, relative to the project directory
    pub header_dirs: Vec<String>,
    /// Library search paths, relative to the project directory
    pub lib_dirs: Vec<String>,
    /// Preprocessor defines
    pub defines: IndexMap<String, DefineValue>,
    /// Buildable modules: module name -> source directory relative to the project
    pub modules: IndexMap<String, String>,
}

/// The `imports` key as written, before normalization.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImports {
    /// Obsolete `imports = ["name", ...]` form
    Legacy(Vec<String>),
    /// `[imports.<name>]` tables
    Map(IndexMap<String, RawImportSpec>),
}

/// One `[imports.<name>]` table.
#[derive(Debug, Deserialize)]
struct RawImportSpec {
    git: Option<String>,
    branch: Option<String>,
}

/// Load the manifest of a project as a key/value table.
pub fn load_manifest(project_dir: &Path) -> Result<Table, ManifestError> {
    if !is_valid_project_dir(project_dir) {
        return Err(ManifestError::InvalidProject {
            dir: project_dir.to_path_buf(),
        });
    }

    let path = manifest_path(project_dir);
    let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;

    content
        .parse::<Table>()
        .map_err(|source| ManifestError::Parse { path, source })
}

/// Get the normalized imports of a project.
///
/// Every returned entry carries a git URL and a branch. An absent `imports`
/// key yields an empty map.
pub fn get_imports(
    registry: &Registry,
    project_dir: &Path,
    diag: &mut Diagnostics,
) -> Result<Imports, ManifestError> {
    let manifest = load_manifest(project_dir)?;
    let path = manifest_path(project_dir);

    let Some(value) = manifest.get("imports") else {
        return Ok(Imports::new());
    };

    let raw: RawImports =
        value
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| ManifestError::MalformedImports {
                path: path.clone(),
                reason: format!(
                    "must be a table of `[imports.<name>]` entries or a list of names, found {} ({})",
                    value.type_str(),
                    e.message()
                ),
            })?;

    match raw {
        RawImports::Legacy(names) => {
            if names.is_empty() {
                return Ok(Imports::new());
            }
            diag.report(
                Diagnostic::warning("imports use the obsolete array format")
                    .with_location(&path)
                    .with_suggestion(suggestions::UPGRADE_IMPORTS),
            );
            upgrade_legacy_imports(registry, &names, &path)
        }
        RawImports::Map(entries) => normalize_imports(entries, &path),
    }
}

fn upgrade_legacy_imports(
    registry: &Registry,
    names: &[String],
    path: &Path,
) -> Result<Imports, ManifestError> {
    let mut imports = Imports::new();

    for name in names {
        let url = registry.url_for(name);
        if !is_git_url(url) {
            return Err(ManifestError::UnresolvableImport {
                entry: url.to_string(),
                path: path.to_path_buf(),
            });
        }

        imports.insert(
            project_name_from_url(url),
            ImportSpec {
                git: git_url_from_url(url).to_string(),
                branch: git_branch_from_url(url).to_string(),
            },
        );
    }

    Ok(imports)
}

fn normalize_imports(
    entries: IndexMap<String, RawImportSpec>,
    path: &Path,
) -> Result<Imports, ManifestError> {
    entries
        .into_iter()
        .map(|(name, raw)| {
            let Some(git) = raw.git else {
                return Err(ManifestError::MissingGitUrl {
                    import: name,
                    path: path.to_path_buf(),
                });
            };
            let branch = raw.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());
            Ok((name, ImportSpec { git, branch }))
        })
        .collect()
}

/// Get the exports of a project, with every key defaulted to empty.
pub fn get_exports(project_dir: &Path) -> Result<Exports, ManifestError> {
    let manifest = load_manifest(project_dir)?;

    let Some(value) = manifest.get("exports") else {
        return Ok(Exports::default());
    };

    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| ManifestError::MalformedExports {
            path: manifest_path(project_dir),
            reason: format!("are invalid: {}", e.message()),
        })
}
