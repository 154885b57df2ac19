//! Version-control seam used by the fetch and sync passes.

use std::path::Path;

use anyhow::Result;

/// A version-control client.
///
/// Both operations may be slow (network) and may fail; callers report
/// failures instead of aborting.
pub trait Vcs {
    /// Clone `url` at `branch` (a branch or tag) into `dest/name`.
    fn clone_repo(&self, url: &str, branch: &str, name: &str, dest: &Path) -> Result<()>;

    /// Check whether a local checkout has diverged from its remote.
    fn is_out_of_sync(&self, dir: &Path) -> Result<bool>;
}
