//! `porter pr` command - create a PR from explicit commits.

use anyhow::{Context, Result};
use porter_git::{Identity, Repository};

use crate::output;
use crate::services::ProposeService;
use crate::services::gh::GhCli;

/// Run the pr command.
pub fn run(branch: &str, shas: &[String]) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;
    let identity = Identity::from_env();

    let service = ProposeService::new(&repo, &GhCli);
    service.run(&identity, branch, shas)?;

    output::success(&format!(
        "proposed {} commit(s) on branch {branch}",
        shas.len()
    ));
    Ok(())
}
