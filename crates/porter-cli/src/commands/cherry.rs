//! `porter cherry` command - cherry-pick an upstream PR onto a branch.

use anyhow::{Context, Result};
use porter_git::{Identity, Repository};
use porter_github::{Auth, GitHubClient};

use crate::output;
use crate::services::CherryService;
use crate::services::gh::GhCli;

/// Run the cherry command.
pub fn run(pr_number: u64, branch: Option<&str>) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;
    let identity = Identity::from_env();
    let api = GitHubClient::new(&Auth::auto()).context("GitHub auth required to look up the PR")?;

    let service = CherryService::new(&repo, &api, &GhCli);
    let summary = service.run(&identity, pr_number, branch)?;

    output::success(&format!(
        "cherry-picked {} commit(s) of #{} onto {} as {}",
        summary.commit_count, pr_number, summary.target, summary.branch
    ));
    Ok(())
}
