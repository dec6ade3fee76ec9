//! Propose workflow: build a branch from upstream main out of explicit
//! commits and open a PR from the fork.

use anyhow::Result;
use porter_git::{ForgeInfo, GitOps, Identity, PushOptions, UrlPolicy};

use super::gh::{PrCreator, PrRequest};

/// Service for the propose workflow.
pub struct ProposeService<'a> {
    git: &'a dyn GitOps,
    gh: &'a dyn PrCreator,
}

impl<'a> ProposeService<'a> {
    /// Create a new propose service.
    pub fn new(git: &'a dyn GitOps, gh: &'a dyn PrCreator) -> Self {
        Self { git, gh }
    }

    /// Run the workflow. Fails fast on the first error.
    ///
    /// # Errors
    /// Fails when remote resolution, any git step, or PR creation fails.
    pub fn run(&self, identity: &Identity, branch_name: &str, shas: &[String]) -> Result<()> {
        let fork = self.git.fork_remote(identity, UrlPolicy::Leave)?;
        let upstream_branch = self.git.find_upstream_branch()?;
        let original = self.git.current_branch()?;

        let upstream = self.git.upstream_remote()?;
        self.git.fetch_remote(&upstream)?;

        self.git.checkout_new_branch(branch_name, &upstream_branch)?;
        self.git.cherry_pick(shas)?;
        self.git.push(&fork, PushOptions { set_upstream: true })?;

        let head_org = match fork.forge() {
            ForgeInfo::Github { org, .. } => org,
            ForgeInfo::Unknown => fork.name.clone(),
        };
        // Title and body are filled from the commits by the tool.
        self.gh.create(&PrRequest {
            base: upstream_branch.short_name.clone(),
            head: format!("{head_org}:{branch_name}"),
            title: None,
            body: None,
        })?;

        self.git.checkout(&original)?;
        Ok(())
    }
}
