//! `porter prune` command - delete branches merged into release branches.

use anyhow::{Context, Result};
use porter_git::Repository;

use crate::output;
use crate::services::PruneService;

/// Run the prune command.
pub fn run(dry_run: bool) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;
    let service = PruneService::new(&repo);

    let plan = service.plan()?;
    output::info(&format!(
        "checking for branches merged into any of {:?}",
        plan.release_branches
            .iter()
            .map(|branch| branch.name.as_str())
            .collect::<Vec<_>>()
    ));

    if plan.prune.is_empty() {
        output::info("no merged branches to prune");
        return Ok(());
    }

    if dry_run {
        for branch in &plan.prune {
            output::detail(&format!("would delete {branch}"));
        }
        return Ok(());
    }

    let deleted = service.execute(&plan)?;
    output::success(&format!("deleted {deleted} branch(es)"));
    Ok(())
}
