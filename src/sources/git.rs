//! Git client backed by libgit2.

use std::path::Path;

use anyhow::{Context, Result};
use git2::build::CheckoutBuilder;
use git2::{Branch, BranchType, Repository, StatusOptions};

use crate::sources::Vcs;

/// [`Vcs`] implementation using `git2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitVcs;

impl GitVcs {
    /// Create a new git client.
    pub fn new() -> Self {
        GitVcs
    }
}

impl Vcs for GitVcs {
    fn clone_repo(&self, url: &str, branch: &str, name: &str, dest: &Path) -> Result<()> {
        let checkout_path = dest.join(name);
        tracing::info!("Cloning {} ({}) into {}", url, branch, checkout_path.display());

        std::fs::create_dir_all(dest)
            .with_context(|| format!("failed to create directory: {}", dest.display()))?;

        let repo = Repository::clone(url, &checkout_path)
            .with_context(|| format!("failed to clone {}", url))?;

        checkout_reference(&repo, branch)
            .with_context(|| format!("failed to check out `{}` of {}", branch, url))?;

        update_submodules(&repo)
            .with_context(|| format!("failed to update submodules of {}", url))?;

        Ok(())
    }

    fn is_out_of_sync(&self, dir: &Path) -> Result<bool> {
        let repo = Repository::open(dir)
            .with_context(|| format!("failed to open git repository: {}", dir.display()))?;

        let mut remote = repo
            .find_remote("origin")
            .with_context(|| format!("no `origin` remote in {}", dir.display()))?;
        let configured_refspecs: &[&str] = &[];
        remote
            .fetch(configured_refspecs, None, None)
            .with_context(|| format!("failed to fetch from {}", remote.url().unwrap_or("origin")))?;

        // Uncommitted or untracked files count as diverged
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);
        if !repo.statuses(Some(&mut opts))?.is_empty() {
            return Ok(true);
        }

        let head = repo.head()?;
        if !head.is_branch() {
            // Detached at a tag, nothing to compare against
            return Ok(false);
        }

        let branch = Branch::wrap(head);
        let Ok(upstream) = branch.upstream() else {
            tracing::debug!("{} has no upstream branch", dir.display());
            return Ok(false);
        };

        let (Some(local), Some(remote)) = (branch.get().target(), upstream.get().target()) else {
            return Ok(true);
        };

        let (ahead, behind) = repo.graph_ahead_behind(local, remote)?;
        Ok(ahead > 0 || behind > 0)
    }
}

/// Check out a branch (tracking `origin/<name>`) or, failing that, a tag.
fn checkout_reference(repo: &Repository, reference: &str) -> Result<()> {
    let remote_name = format!("origin/{}", reference);

    if let Ok(remote_branch) = repo.find_branch(&remote_name, BranchType::Remote) {
        let commit = remote_branch.get().peel_to_commit()?;
        if repo.find_branch(reference, BranchType::Local).is_err() {
            let mut local = repo.branch(reference, &commit, false)?;
            local.set_upstream(Some(&remote_name))?;
        }
        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head(&format!("refs/heads/{}", reference))?;
        return Ok(());
    }

    let tag = repo
        .find_reference(&format!("refs/tags/{}", reference))
        .with_context(|| format!("no branch or tag named `{}`", reference))?;
    let commit = tag.peel_to_commit()?;
    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
    repo.set_head_detached(commit.id())?;

    Ok(())
}

fn update_submodules(repo: &Repository) -> Result<()> {
    for mut submodule in repo.submodules()? {
        submodule.update(true, None)?;
        let sub_repo = submodule.open()?;
        update_submodules(&sub_repo)?;
    }
    Ok(())
}
