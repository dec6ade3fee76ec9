//! `porter toc` command - commits on this branch, oldest first.

use anyhow::{Context, Result};
use porter_git::Repository;

/// Run the toc command.
pub fn run() -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;

    let upstream = repo.find_upstream_branch()?;
    let range = format!("{}...", upstream.name);
    repo.run_interactive(&["log", "--oneline", &range, "--reverse"])?;
    Ok(())
}
