//! `porter workspace` command - switch to a contributor's branch.

use anyhow::{Context, Result, bail};
use porter_git::{Branch, Repository};

use crate::output;

/// Run the workspace command.
pub fn run(name: &str) -> Result<()> {
    let Some((user, branch)) = name.split_once(':') else {
        bail!("workspace name must be in the format 'user:branch'");
    };
    if user.is_empty() || branch.is_empty() {
        bail!("workspace name must be in the format 'user:branch'");
    }

    let repo = Repository::open_current().context("not inside a git repository")?;
    repo.checkout(&Branch::local(branch))?;
    output::success(&format!("switched to {branch} (from {user})"));
    Ok(())
}
