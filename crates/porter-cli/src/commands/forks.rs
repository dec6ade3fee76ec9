//! `porter forks` command - normalize fork and upstream remotes.

use anyhow::{Context, Result};
use porter_git::{Identity, Repository, UrlPolicy};

use crate::output;

/// Run the forks command.
pub fn run(no_fix_urls: bool) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;
    let identity = Identity::from_env();
    let policy = if no_fix_urls {
        UrlPolicy::Leave
    } else {
        UrlPolicy::Correct
    };

    let fork = repo.fork_remote(&identity, policy)?;
    output::info(&format!(
        "fork remote: {} (fetch {}, push {})",
        fork.name, fork.fetch_url, fork.push_url
    ));

    let upstream = repo.upstream_remote()?;
    output::info(&format!(
        "upstream remote: {} ({})",
        upstream.name, upstream.fetch_url
    ));

    Ok(())
}
