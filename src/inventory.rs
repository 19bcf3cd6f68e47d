use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::traversal::WalkedTree;
use crate::types::{FileEntry, Inventory, NO_EXTENSION};

pub struct InventoryOptions {
    /// How many of the largest files to keep (default 10).
    pub largest: usize,
    /// Cap on the hidden-files listing (default 20).
    pub hidden_cap: usize,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        InventoryOptions {
            largest: 10,
            hidden_cap: 20,
        }
    }
}

/// Derives the full inventory from one walk of the cloned tree.
///
/// Files that cannot be stat'ed drop out of the listing; everything else is
/// derived from the surviving entries, so the extension histogram always sums
/// to the reported file total.
pub fn build(root: &Path, walked: WalkedTree, opts: &InventoryOptions) -> Inventory {
    let mut files: Vec<FileEntry> = walked
        .files
        .into_par_iter()
        .filter_map(|rel| {
            let size = fs::metadata(root.join(&rel)).ok()?.len();
            Some(FileEntry { path: rel, size })
        })
        .collect();

    files.sort_by(|a, b| {
        let ka = a.path.to_string_lossy().to_lowercase();
        let kb = b.path.to_string_lossy().to_lowercase();
        ka.cmp(&kb)
    });

    let mut extensions: IndexMap<String, usize> = IndexMap::new();
    for entry in &files {
        let key = entry
            .path
            .extension()
            .and_then(|s| s.to_str())
            .map_or_else(|| NO_EXTENSION.to_string(), |e| e.to_ascii_lowercase());
        *extensions.entry(key).or_insert(0) += 1;
    }
    extensions.sort_by(|ka, va, kb, vb| vb.cmp(va).then_with(|| ka.cmp(kb)));

    let mut by_size = files.clone();
    by_size.sort_by(|a, b| b.size.cmp(&a.size));
    by_size.truncate(opts.largest);

    let hidden = files
        .iter()
        .filter(|e| file_name_of(e).starts_with('.'))
        .map(|e| e.path.clone())
        .take(opts.hidden_cap)
        .collect();

    let readmes = files
        .iter()
        .filter(|e| file_name_of(e).to_lowercase().contains("readme"))
        .map(|e| e.path.clone())
        .collect();

    Inventory {
        files,
        dirs: walked.dirs,
        extensions,
        largest: by_size,
        hidden,
        readmes,
    }
}

fn file_name_of(entry: &FileEntry) -> String {
    entry
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("README.md"), "# hi\n").unwrap();
        fs::write(dir.path().join("docs/readme.txt"), "hello there\n").unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("lib.RS"), "pub fn x() {}\n").unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();
        fs::write(dir.path().join("Makefile"), "all:\n").unwrap();
        dir
    }

    fn walk(dir: &tempfile::TempDir) -> WalkedTree {
        crate::traversal::collect_paths(dir.path()).unwrap()
    }

    #[test]
    fn histogram_sums_to_total_files() {
        let dir = fixture();
        let inv = build(dir.path(), walk(&dir), &InventoryOptions::default());
        assert_eq!(inv.total_files(), 6);
        assert_eq!(inv.histogram_total(), inv.total_files());
    }

    #[test]
    fn extensions_are_lowercased_and_sorted_by_count() {
        let dir = fixture();
        let inv = build(dir.path(), walk(&dir), &InventoryOptions::default());
        assert_eq!(inv.extensions.get("rs"), Some(&2));
        assert_eq!(inv.extensions.get("md"), Some(&1));
        assert_eq!(inv.extensions.get(NO_EXTENSION), Some(&2));
        let first = inv.extensions.get_index(0).unwrap();
        assert_eq!(*first.1, 2);
    }

    #[test]
    fn finds_readmes_and_hidden_files() {
        let dir = fixture();
        let inv = build(dir.path(), walk(&dir), &InventoryOptions::default());
        assert_eq!(inv.readmes.len(), 2);
        assert_eq!(inv.hidden, vec![PathBuf::from(".env")]);
    }

    #[test]
    fn largest_is_capped_and_descending() {
        let dir = fixture();
        let opts = InventoryOptions {
            largest: 3,
            hidden_cap: 20,
        };
        let inv = build(dir.path(), walk(&dir), &opts);
        assert_eq!(inv.largest.len(), 3);
        assert!(inv.largest[0].size >= inv.largest[1].size);
        assert!(inv.largest[1].size >= inv.largest[2].size);
    }

    #[test]
    fn hidden_cap_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..30 {
            fs::write(dir.path().join(format!(".h{i:02}")), "x\n").unwrap();
        }
        let inv = build(dir.path(), walk(&dir), &InventoryOptions::default());
        assert_eq!(inv.hidden.len(), 20);
        assert_eq!(inv.total_files(), 30);
    }

    #[test]
    fn files_sorted_case_insensitively() {
        let dir = fixture();
        let inv = build(dir.path(), walk(&dir), &InventoryOptions::default());
        let keys: Vec<String> = inv
            .files
            .iter()
            .map(|e| e.path.to_string_lossy().to_lowercase())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
