//! `porter top` command - most recently changed local branches.

use anyhow::{Context, Result};
use porter_git::Repository;

/// Run the top command.
pub fn run(limit: usize) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;

    let count = format!("--count={limit}");
    repo.run_interactive(&[
        "for-each-ref",
        "--sort=-committerdate",
        &count,
        "--format=%(refname:short)",
        "refs/heads",
    ])?;
    Ok(())
}
