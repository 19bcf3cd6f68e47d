use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Renders a depth-capped tree view of `root`, directories first, names
/// sorted case-insensitively, `.git*` entries skipped.
///
/// # Errors
/// Returns an error if a directory cannot be read; the caller degrades to a
/// flat listing instead of aborting.
pub fn render(root: &Path, max_depth: usize) -> Result<String> {
    let mut out = String::new();
    render_dir(root, max_depth, 0, "", &mut out)?;
    Ok(out)
}

fn render_dir(
    dir: &Path,
    max_depth: usize,
    depth: usize,
    prefix: &str,
    out: &mut String,
) -> Result<()> {
    if depth > max_depth {
        return Ok(());
    }

    let mut items: Vec<(bool, String)> = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(".git") {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        items.push((is_dir, name));
    }
    // Directories first, then case-insensitive name order.
    items.sort_by_key(|(is_dir, name)| (!is_dir, name.to_lowercase()));

    let count = items.len();
    for (i, (is_dir, name)) in items.into_iter().enumerate() {
        let last = i == count - 1;
        let connector = if last { "└── " } else { "├── " };
        let _ = writeln!(out, "{prefix}{connector}{name}");

        if is_dir && depth < max_depth {
            let extension = if last { "    " } else { "│   " };
            render_dir(
                &dir.join(&name),
                max_depth,
                depth + 1,
                &format!("{prefix}{extension}"),
                out,
            )?;
        }
    }
    Ok(())
}
