use std::path::Path;

use anyhow::{Context, Result};
use git2::build::RepoBuilder;
use git2::{FetchOptions, RemoteCallbacks, Repository};
use indicatif::ProgressBar;

/// Derives the default destination directory from the repository URL: the
/// final path segment with trailing slashes trimmed and one `.git` stripped.
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let base = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = base.strip_suffix(".git").unwrap_or(base);
    if name.is_empty() {
        "repo".to_string()
    } else {
        name.to_string()
    }
}

/// Clones `url` into `dest`, optionally shallow and with a progress bar fed
/// from libgit2's transfer callbacks.
///
/// # Errors
/// Returns an error if the clone fails for any reason; the caller treats this
/// as fatal.
pub fn clone_repo(
    url: &str,
    dest: &Path,
    depth: u32,
    progress: Option<&ProgressBar>,
) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    if let Some(pb) = progress {
        callbacks.transfer_progress(move |stats| {
            pb.set_length(stats.total_objects() as u64);
            pb.set_position(stats.received_objects() as u64);
            true
        });
    }

    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(callbacks);
    if depth > 0 {
        fetch.depth(depth.min(i32::MAX as u32) as i32);
    }

    let repo = RepoBuilder::new()
        .fetch_options(fetch)
        .clone(url, dest)
        .with_context(|| format!("clone {url} into {}", dest.display()))?;
    Ok(repo)
}

pub struct VcsContext {
    pub repo: Repository,
}

impl VcsContext {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).context("open git repo")?;
        Ok(Self { repo })
    }

    /// URL of the `origin` remote, if configured.
    pub fn remote_url(&self) -> Option<String> {
        let remote = self.repo.find_remote("origin").ok()?;
        remote.url().map(ToString::to_string)
    }

    /// Short name of the checked-out branch (`None` on detached HEAD quirks).
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        head.shorthand().map(ToString::to_string)
    }

    /// One-line summary of the HEAD commit: short id, subject, author date.
    pub fn latest_commit(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        let commit = head.peel_to_commit().ok()?;
        let id = commit.id().to_string();
        let short = &id[..7.min(id.len())];
        let summary = commit.summary().unwrap_or("").to_string();
        let when = chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Some(format!("{short} {summary} ({when})"))
    }
}
