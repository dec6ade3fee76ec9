//! Cherry-pick workflow: replay an upstream PR onto a target branch and
//! open a follow-up PR from the fork.

use anyhow::{Context, Result, bail};
use porter_git::{Branch, ForgeInfo, GitOps, Identity, PushOptions, UrlPolicy};
use porter_github::ForgeApi;

use super::gh::{PrCreator, PrRequest};

/// Result of a completed cherry-pick workflow.
#[derive(Debug, Clone)]
pub struct CherrySummary {
    /// Name of the branch that was created and pushed.
    pub branch: String,
    /// The branch the commits were picked onto.
    pub target: String,
    /// Number of commits replayed.
    pub commit_count: usize,
}

/// Service for the cherry-pick workflow.
pub struct CherryService<'a> {
    git: &'a dyn GitOps,
    api: &'a dyn ForgeApi,
    gh: &'a dyn PrCreator,
}

impl<'a> CherryService<'a> {
    /// Create a new cherry service.
    pub fn new(git: &'a dyn GitOps, api: &'a dyn ForgeApi, gh: &'a dyn PrCreator) -> Self {
        Self { git, api, gh }
    }

    /// The deterministic name of the workflow branch for a PR and target.
    #[must_use]
    pub fn pr_branch_name(pr_number: u64, target: &str) -> String {
        format!("automated-cherry-pick-of-#{pr_number}-{target}")
    }

    /// Run the workflow. Fails fast on the first error; already-executed
    /// steps (created branch, picked commits) are left in place for the
    /// user to inspect or clean up.
    ///
    /// # Errors
    /// Fails when remote resolution, the PR lookup, any git step, or the
    /// PR creation fails.
    pub fn run(
        &self,
        identity: &Identity,
        pr_number: u64,
        target_branch: Option<&str>,
    ) -> Result<CherrySummary> {
        let fork = self.git.fork_remote(identity, UrlPolicy::Leave)?;
        let upstream = self.git.upstream_remote()?;

        let ForgeInfo::Github { org, repo } = upstream.forge() else {
            bail!(
                "upstream remote {} ({}) is not a GitHub repository",
                upstream.name,
                upstream.fetch_url
            );
        };

        let target = match target_branch {
            Some(name) => Branch::local(name),
            None => self.git.current_branch()?,
        };

        // Recorded before any checkout so the final switch-back restores
        // where the user actually was.
        let original = self.git.current_branch()?;

        let pr = self
            .api
            .get_pr(&org, &repo, pr_number)
            .with_context(|| format!("looking up PR #{pr_number} on {org}/{repo}"))?;
        let commits = self.api.list_pr_commits(&org, &repo, pr_number)?;
        if commits.is_empty() {
            bail!("PR #{pr_number} has no commits");
        }
        let shas: Vec<String> = commits.into_iter().map(|commit| commit.sha).collect();

        let branch_name = Self::pr_branch_name(pr_number, &target.name);
        self.git.checkout_new_branch(&branch_name, &target)?;
        self.git.cherry_pick(&shas)?;
        self.git.push(&fork, PushOptions { set_upstream: true })?;

        let head_org = match fork.forge() {
            ForgeInfo::Github { org, .. } => org,
            ForgeInfo::Unknown => fork.name.clone(),
        };
        let title = format!("Automated cherry pick of #{pr_number}: {}", pr.title);
        let body = format!(
            "Cherry pick of #{pr_number} on {}\n\n#{pr_number}: {}\n",
            target.name, pr.title
        );
        self.gh.create(&PrRequest {
            base: target.short_name.clone(),
            head: format!("{head_org}:{branch_name}"),
            title: Some(title),
            body: Some(body),
        })?;

        self.git.checkout(&original)?;

        Ok(CherrySummary {
            branch: branch_name,
            target: target.name,
            commit_count: shas.len(),
        })
    }
}
