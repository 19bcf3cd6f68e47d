use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};

mod run_impl;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "repoinv",
    version,
    about = "Clone a git repository and print an inventory of its contents",
    long_about = None
)]
pub struct Args {
    /// Repository URL to clone (https, ssh, or a local path)
    #[arg(value_name = "URL", value_hint = ValueHint::Url)]
    pub url: String,

    /// Destination directory (defaults to the repo name taken from the URL)
    #[arg(value_name = "DEST", value_hint = ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Shallow clone depth (0 = full history)
    #[arg(long = "depth", value_name = "N", default_value_t = 0)]
    pub depth: u32,

    /// Maximum depth of the tree view
    #[arg(long = "tree-depth", value_name = "N", default_value_t = 3)]
    pub tree_depth: usize,

    /// Number of largest files to report
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Cap on the hidden-files listing
    #[arg(long = "hidden-cap", value_name = "N", default_value_t = 20)]
    pub hidden_cap: usize,

    /// Show a progress bar while cloning
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if the clone fails; inventory reporting is best-effort.
pub fn run() -> Result<()> {
    let args = Args::parse();
    run_impl::run_with_args(&args)
}
