//! Helpers for registry-style git URLs.
//!
//! Registry entries and legacy imports use a compact `url#branch` form,
//! e.g. `https://github.com/floooh/sokol.git#v1.0`. A missing fragment
//! means the default branch.

/// Branch used when an import or URL does not name one.
pub const DEFAULT_BRANCH: &str = "master";

const GIT_SCHEMES: &[&str] = &["https://", "http://", "ssh://", "git://", "file://", "git@"];

/// Split `url#branch` into its two halves.
fn split_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((base, branch)) => (base, Some(branch)),
        None => (url, None),
    }
}

/// Check whether a string looks like a git URL rather than a bare name.
pub fn is_git_url(url: &str) -> bool {
    let (base, _) = split_fragment(url);
    if base.is_empty() {
        return false;
    }
    base.ends_with(".git") || GIT_SCHEMES.iter().any(|scheme| base.starts_with(scheme))
}

/// Get the git URL without the branch fragment.
pub fn git_url_from_url(url: &str) -> &str {
    split_fragment(url).0
}

/// Get the branch named by the URL fragment, or the default branch.
pub fn git_branch_from_url(url: &str) -> &str {
    match split_fragment(url).1 {
        Some(branch) if !branch.is_empty() => branch,
        _ => DEFAULT_BRANCH,
    }
}

/// Derive the project name from a git URL (last path segment minus `.git`).
pub fn project_name_from_url(url: &str) -> String {
    let base = git_url_from_url(url).trim_end_matches('/');
    let last = base
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(base);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_git_url() {
        assert!(is_git_url("https://github.com/floooh/sokol.git"));
        assert!(is_git_url("https://github.com/floooh/sokol"));
        assert!(is_git_url("git@github.com:floooh/sokol.git#v1.0"));
        assert!(is_git_url("../local/repo.git"));
        assert!(!is_git_url("sokol"));
        assert!(!is_git_url("#master"));
    }

    #[test]
    fn test_branch_from_url() {
        assert_eq!(git_branch_from_url("https://example.com/a.git#v2"), "v2");
        assert_eq!(git_branch_from_url("https://example.com/a.git"), "master");
        assert_eq!(git_branch_from_url("https://example.com/a.git#"), "master");
    }

    #[test]
    fn test_project_name_from_url() {
        assert_eq!(
            project_name_from_url("https://github.com/floooh/sokol.git#dev"),
            "sokol"
        );
        assert_eq!(project_name_from_url("git@github.com:floooh/oryol.git"), "oryol");
        assert_eq!(project_name_from_url("https://example.com/org/lib/"), "lib");
    }

    #[test]
    fn test_git_url_from_url() {
        assert_eq!(
            git_url_from_url("https://example.com/a.git#v2"),
            "https://example.com/a.git"
        );
    }
}
