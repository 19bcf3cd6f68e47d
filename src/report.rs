use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::Path;

use crate::types::{Inventory, RepoInfo};

pub mod tree;

const BANNER_WIDTH: usize = 50;

/// One `=`-delimited section header, bolded on capable terminals.
pub fn banner(title: &str) -> String {
    let line = "=".repeat(BANNER_WIDTH);
    let title = Colors::enabled().bold(title);
    format!("\n{line}\n{title}\n{line}")
}

/// Converts a byte count to a one-decimal human-readable size.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

pub fn header(url: &str, dest: &Path, cwd: &Path) -> String {
    let mut out = banner("REPOSITORY CLONE");
    let _ = write!(
        out,
        "\nRepository URL: {url}\nDestination directory: {}\nWorking directory: {}",
        dest.display(),
        cwd.display()
    );
    out
}

pub fn repo_info(info: &RepoInfo) -> String {
    let na = || "N/A".to_string();
    let mut out = banner("REPOSITORY INFORMATION");
    let _ = write!(
        out,
        "\nRemote URL: {}\nCurrent branch: {}\nLatest commit: {}",
        info.remote_url.clone().unwrap_or_else(na),
        info.branch.clone().unwrap_or_else(na),
        info.latest_commit.clone().unwrap_or_else(na)
    );
    out
}

/// Tree view of the clone; falls back to the flat listing when the renderer
/// cannot read the tree, so the run still completes.
pub fn tree_section(root: &Path, max_depth: usize, inv: &Inventory) -> String {
    let mut out = banner("DIRECTORY STRUCTURE (tree view)");
    out.push('\n');
    match tree::render(root, max_depth) {
        Ok(rendered) if !rendered.is_empty() => out.push_str(rendered.trim_end()),
        _ => out.push_str(flat_listing(inv).trim_end()),
    }
    out
}

/// Flat sorted file listing, one repo-relative path per line.
pub fn flat_listing(inv: &Inventory) -> String {
    if inv.files.is_empty() {
        return "(none)".to_string();
    }
    let mut out = String::new();
    for entry in &inv.files {
        let _ = writeln!(out, "{}", entry.path.display());
    }
    out
}

pub fn all_files(inv: &Inventory) -> String {
    let mut out = banner("ALL FILES");
    if inv.files.is_empty() {
        out.push_str("\n(none)");
        return out;
    }
    for entry in &inv.files {
        let _ = write!(
            out,
            "\n{:>10} : {}",
            human_size(entry.size),
            entry.path.display()
        );
    }
    out
}

pub fn count_summary(inv: &Inventory) -> String {
    let mut out = banner("FILE COUNT SUMMARY");
    let _ = write!(
        out,
        "\nTotal files: {}\nTotal directories: {}",
        inv.total_files(),
        inv.dirs
    );
    out
}

/// Top 15 rows of the extension histogram; the underlying map still covers
/// every file.
pub fn extension_histogram(inv: &Inventory) -> String {
    let mut out = banner("FILES BY EXTENSION");
    if inv.extensions.is_empty() {
        out.push_str("\n(none)");
        return out;
    }
    for (ext, count) in inv.extensions.iter().take(15) {
        let _ = write!(out, "\n{ext:<20} : {count:>4} files");
    }
    out
}

pub fn hidden_files(inv: &Inventory, cap: usize) -> String {
    let mut out = banner(&format!("HIDDEN FILES (first {cap})"));
    if inv.hidden.is_empty() {
        out.push_str("\n(none)");
        return out;
    }
    for path in &inv.hidden {
        let _ = write!(out, "\n{}", path.display());
    }
    out
}

pub fn largest_files(inv: &Inventory, top: usize) -> String {
    let mut out = banner(&format!("LARGEST FILES (top {top})"));
    if inv.largest.is_empty() {
        out.push_str("\n(none)");
        return out;
    }
    for entry in &inv.largest {
        let _ = write!(
            out,
            "\n{:>10} : {}",
            human_size(entry.size),
            entry.path.display()
        );
    }
    out
}

pub fn readme_files(inv: &Inventory) -> String {
    let mut out = banner("README FILES");
    if inv.readmes.is_empty() {
        out.push_str("\n(none)");
        return out;
    }
    for path in &inv.readmes {
        let _ = write!(out, "\n{}", path.display());
    }
    out
}

pub fn completion(repo_path: &Path) -> String {
    let mut out = banner("RUN COMPLETE");
    let _ = write!(out, "\nRepository cloned to: {}", repo_path.display());
    out
}

struct Colors {
    enabled: bool,
}

impl Colors {
    fn enabled() -> Self {
        let force = std::env::var("CLICOLOR_FORCE")
            .ok()
            .filter(|v| v != "0")
            .is_some();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let clicolor_zero = std::env::var("CLICOLOR")
            .ok()
            .map(|v| v == "0")
            .unwrap_or(false);
        let term = std::io::stdout().is_terminal();
        let enabled = if force {
            true
        } else if no_color || clicolor_zero {
            false
        } else {
            term
        };
        Colors { enabled }
    }

    fn bold(&self, s: &str) -> String {
        if self.enabled {
            format!("\x1b[1m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileEntry;
    use std::path::PathBuf;

    fn sample() -> Inventory {
        let files = vec![
            FileEntry {
                path: PathBuf::from("README.md"),
                size: 42,
            },
            FileEntry {
                path: PathBuf::from("src/main.rs"),
                size: 2048,
            },
        ];
        let mut inv = Inventory {
            largest: files.clone(),
            readmes: vec![PathBuf::from("README.md")],
            files,
            dirs: 1,
            ..Inventory::default()
        };
        inv.extensions.insert("md".to_string(), 1);
        inv.extensions.insert("rs".to_string(), 1);
        inv
    }

    #[test]
    fn human_size_steps_through_units() {
        assert_eq!(human_size(0), "0.0 B");
        assert_eq!(human_size(512), "512.0 B");
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn banner_is_delimited() {
        let b = banner("FILE COUNT SUMMARY");
        assert!(b.contains("FILE COUNT SUMMARY"));
        assert!(b.contains(&"=".repeat(50)));
    }

    #[test]
    fn count_summary_reports_totals() {
        let s = count_summary(&sample());
        assert!(s.contains("Total files: 2"));
        assert!(s.contains("Total directories: 1"));
    }

    #[test]
    fn histogram_section_lists_extensions() {
        let s = extension_histogram(&sample());
        assert!(s.contains("md"));
        assert!(s.contains("rs"));
        assert!(s.contains("1 files"));
    }

    #[test]
    fn empty_sections_say_none() {
        let inv = Inventory::default();
        assert!(readme_files(&inv).contains("(none)"));
        assert!(hidden_files(&inv, 20).contains("(none)"));
        assert!(largest_files(&inv, 10).contains("(none)"));
        assert!(flat_listing(&inv).contains("(none)"));
    }

    #[test]
    fn tree_section_falls_back_to_flat_listing() {
        let inv = sample();
        let missing = PathBuf::from("/definitely/not/a/real/root");
        let s = tree_section(&missing, 3, &inv);
        assert!(s.contains("README.md"));
        assert!(s.contains("src/main.rs"));
    }

    #[test]
    fn repo_info_falls_back_to_na() {
        let s = repo_info(&RepoInfo::default());
        assert_eq!(s.matches("N/A").count(), 3);
    }

    #[test]
    fn all_files_pairs_sizes_with_paths() {
        let s = all_files(&sample());
        assert!(s.contains("42.0 B"));
        assert!(s.contains("2.0 KB"));
        assert!(s.contains("src/main.rs"));
    }
}
