use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

/// Result of one walk over the cloned tree: repo-relative file paths plus the
/// number of directories seen.
pub struct WalkedTree {
    pub files: Vec<PathBuf>,
    pub dirs: usize,
}

/// Walks `root` and collects every regular file, `.git` excluded.
///
/// The walk looks at a fresh clone, so gitignore handling is switched off and
/// hidden files are kept; the inventory must see the whole tree. Entries that
/// fail to stat are skipped rather than aborting the walk.
pub fn collect_paths(root: &Path) -> Result<WalkedTree> {
    let mut builder = WalkBuilder::new(root);
    builder.hidden(false);
    builder.git_ignore(false);
    builder.git_exclude(false);
    builder.git_global(false);
    builder.ignore(false);
    builder.parents(false);
    builder.require_git(false);
    builder.filter_entry(|dent| dent.file_name() != ".git");

    let mut files = Vec::new();
    let mut dirs = 0usize;
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(_) => continue,
        };
        let Some(ft) = dent.file_type() else {
            continue;
        };
        if ft.is_dir() {
            // The walk yields the root itself at depth 0; don't count it.
            if dent.depth() > 0 {
                dirs += 1;
            }
            continue;
        }
        if !ft.is_file() {
            continue;
        }
        let rel = dent
            .path()
            .strip_prefix(root)
            .unwrap_or(dent.path())
            .to_path_buf();
        files.push(rel);
    }

    Ok(WalkedTree { files, dirs })
}
