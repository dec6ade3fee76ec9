//! `porter rebase` command - rebase onto the upstream main branch.

use anyhow::{Context, Result};
use porter_git::Repository;

/// Run the rebase command.
pub fn run(interactive: bool) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;

    let upstream = repo.find_upstream_branch()?;
    let remote = repo.upstream_remote()?;
    repo.fetch_remote(&remote)?;

    let mut args = vec!["rebase"];
    if interactive {
        args.push("-i");
    }
    args.push("--autosquash");
    args.push(&upstream.name);

    repo.run_interactive(&args)?;
    Ok(())
}
