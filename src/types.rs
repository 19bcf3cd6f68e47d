use std::path::PathBuf;

use indexmap::IndexMap;

/// One regular file inside the cloned tree, keyed by its repo-relative path.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Best-effort repository metadata; `None` renders as `N/A`.
#[derive(Debug, Clone, Default)]
pub struct RepoInfo {
    pub remote_url: Option<String>,
    pub branch: Option<String>,
    pub latest_commit: Option<String>,
}

/// Histogram key for files without an extension.
pub const NO_EXTENSION: &str = "[no extension]";

/// Everything one analysis pass learns about the cloned tree.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// All regular files, sorted case-insensitively by path.
    pub files: Vec<FileEntry>,
    /// Directory count, excluding the repo root and `.git`.
    pub dirs: usize,
    /// Lowercase extension -> file count, descending by count then name.
    pub extensions: IndexMap<String, usize>,
    /// Top N files by size, descending.
    pub largest: Vec<FileEntry>,
    /// Dot-files, capped by the caller.
    pub hidden: Vec<PathBuf>,
    /// Files whose name contains "readme" case-insensitively.
    pub readmes: Vec<PathBuf>,
}

impl Inventory {
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// Sum of histogram buckets; always equals `total_files()`.
    pub fn histogram_total(&self) -> usize {
        self.extensions.values().sum()
    }
}
