pub mod cli;
pub mod inventory;
pub mod report;
pub mod traversal;
pub mod types;
pub mod vcs;
