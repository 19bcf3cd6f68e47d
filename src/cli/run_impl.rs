use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::inventory::{self, InventoryOptions};
use crate::types::RepoInfo;
use crate::{report, traversal, vcs};

use super::Args;

pub fn run_with_args(args: &Args) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| PathBuf::from(vcs::repo_name_from_url(&args.url)));

    let cwd = std::env::current_dir().context("read current directory")?;
    println!("{}", report::header(&args.url, &dest, &cwd));

    if dest.exists() {
        eprintln!(
            "warning: destination '{}' already exists, removing it",
            dest.display()
        );
        fs::remove_dir_all(&dest)
            .with_context(|| format!("remove existing destination {}", dest.display()))?;
    }

    if args.verbose > 0 {
        eprintln!("Cloning {} into {}", args.url, dest.display());
        if args.depth > 0 {
            eprintln!("Shallow clone depth: {}", args.depth);
        }
    }

    let pb = if args.progress {
        let pb = indicatif::ProgressBar::new(0);
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner} {pos}/{len} objects {wide_bar}")
                .unwrap()
                .tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"),
        );
        Some(pb)
    } else {
        None
    };

    // Fail-fast tier: a clone error aborts the whole run.
    vcs::clone_repo(&args.url, &dest, args.depth, pb.as_ref())?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let repo_path = dest
        .canonicalize()
        .with_context(|| format!("resolve clone path {}", dest.display()))?;
    // The working directory moves into the clone once and stays there.
    std::env::set_current_dir(&repo_path)
        .with_context(|| format!("enter clone at {}", repo_path.display()))?;

    // Everything below is best-effort; missing answers degrade the section.
    let info = match vcs::VcsContext::open(&repo_path) {
        Ok(ctx) => RepoInfo {
            remote_url: ctx.remote_url(),
            branch: ctx.current_branch(),
            latest_commit: ctx.latest_commit(),
        },
        Err(err) => {
            if args.verbose > 0 {
                eprintln!("could not reopen clone for metadata: {err}");
            }
            RepoInfo::default()
        }
    };
    println!("{}", report::repo_info(&info));

    let walked = traversal::collect_paths(&repo_path).unwrap_or_else(|err| {
        if args.verbose > 0 {
            eprintln!("walk failed: {err}");
        }
        traversal::WalkedTree {
            files: Vec::new(),
            dirs: 0,
        }
    });
    if args.verbose > 0 {
        eprintln!("Collected {} files, {} directories", walked.files.len(), walked.dirs);
    }

    let opts = InventoryOptions {
        largest: args.top,
        hidden_cap: args.hidden_cap,
    };
    let inv = inventory::build(&repo_path, walked, &opts);

    println!("{}", report::tree_section(&repo_path, args.tree_depth, &inv));
    println!("{}", report::all_files(&inv));
    println!("{}", report::count_summary(&inv));
    println!("{}", report::extension_histogram(&inv));
    println!("{}", report::hidden_files(&inv, args.hidden_cap));
    println!("{}", report::largest_files(&inv, args.top));
    println!("{}", report::readme_files(&inv));
    println!("{}", report::completion(&repo_path));

    Ok(())
}
