//! Template expansion for generated files.
//!
//! Templates use `$name` or `${name}` placeholders; `$$` is a literal `$`.
//! Unknown placeholders are left untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::{Captures, Regex};

use crate::util::fs::{read_to_string_if_exists, write_string};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("placeholder pattern is valid")
});

/// Substitute placeholders in `template`.
pub fn expand(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match values.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Expand a named template into `dst_dir/filename`.
///
/// `templates_dir/filename` is used when it exists, `default` otherwise.
pub fn copy_template_file(
    templates_dir: &Path,
    dst_dir: &Path,
    filename: &str,
    default: &str,
    values: &HashMap<&str, String>,
) -> Result<PathBuf> {
    let template = read_to_string_if_exists(&templates_dir.join(filename))?
        .unwrap_or_else(|| default.to_string());

    let dst = dst_dir.join(filename);
    write_string(&dst, &expand(&template, values))?;
    tracing::debug!("Wrote {}", dst.display());

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values() -> HashMap<&'static str, String> {
        HashMap::from([("genpaths", "\"/a\",\n".to_string())])
    }

    #[test]
    fn test_expand_placeholders() {
        assert_eq!(expand("x = [$genpaths]", &values()), "x = [\"/a\",\n]");
        assert_eq!(expand("${genpaths}end", &values()), "\"/a\",\nend");
        assert_eq!(expand("cost: $$5 $unknown", &values()), "cost: $5 $unknown");
    }

    #[test]
    fn test_copy_template_prefers_override() {
        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join("templates");
        let out = tmp.path().join("out");
        std::fs::create_dir_all(&templates).unwrap();

        let dst = copy_template_file(&templates, &out, "gen.py", "default $genpaths", &values())
            .unwrap();
        assert!(std::fs::read_to_string(&dst).unwrap().starts_with("default \"/a\""));

        std::fs::write(templates.join("gen.py"), "override ${genpaths}").unwrap();
        copy_template_file(&templates, &out, "gen.py", "default $genpaths", &values()).unwrap();
        assert!(std::fs::read_to_string(&dst).unwrap().starts_with("override \"/a\""));
    }
}
