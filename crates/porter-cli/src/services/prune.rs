//! Prune workflow: delete local branches merged into any upstream
//! release branch.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use porter_git::{Branch, GitOps};

/// Branches considered release lines, which merged work is judged
/// against and which are themselves never pruned.
fn is_release_branch(short_name: &str) -> bool {
    short_name == "main" || short_name == "master" || short_name.starts_with("release-")
}

/// The computed prune set for one run.
#[derive(Debug, Clone)]
pub struct PrunePlan {
    /// Upstream release branches the merged sets were computed against.
    pub release_branches: Vec<Branch>,
    /// Local branches merged into at least one release branch.
    pub prune: BTreeSet<String>,
}

/// Service for the prune workflow.
pub struct PruneService<'a> {
    git: &'a dyn GitOps,
}

impl<'a> PruneService<'a> {
    /// Create a new prune service.
    pub fn new(git: &'a dyn GitOps) -> Self {
        Self { git }
    }

    /// Compute the prune set without changing anything.
    ///
    /// # Errors
    /// Fails when the upstream remote cannot be resolved or fetched, or
    /// when no release branches exist on it.
    pub fn plan(&self) -> Result<PrunePlan> {
        let upstream = self.git.upstream_remote()?;
        self.git.fetch_remote(&upstream)?;

        let all_branches = self.git.list_remote_branches(&upstream)?;
        let release_branches: Vec<Branch> = all_branches
            .into_iter()
            .filter(|branch| is_release_branch(&branch.short_name))
            .collect();
        if release_branches.is_empty() {
            bail!("cannot determine any release branches on {}", upstream.name);
        }

        let release_names: BTreeSet<&str> = release_branches
            .iter()
            .map(|branch| branch.short_name.as_str())
            .collect();

        let mut prune = BTreeSet::new();
        for release_branch in &release_branches {
            for name in self.git.merged_branches(release_branch)? {
                if release_names.contains(name.as_str()) {
                    tracing::info!("won't delete release branch {name:?}");
                } else {
                    tracing::info!(
                        "branch {name:?} is merged into {:?}",
                        release_branch.name
                    );
                    prune.insert(name);
                }
            }
        }

        Ok(PrunePlan {
            release_branches,
            prune,
        })
    }

    /// Delete every branch in the plan, continuing past individual
    /// failures. Returns the number deleted.
    ///
    /// # Errors
    /// Fails after the batch when any deletion failed, naming each
    /// branch that could not be deleted.
    pub fn execute(&self, plan: &PrunePlan) -> Result<usize> {
        let mut failures = Vec::new();
        let mut deleted = 0;
        for branch in &plan.prune {
            match self.git.delete_branch(branch) {
                Ok(()) => deleted += 1,
                Err(e) => failures.push(format!("{branch}: {e}")),
            }
        }

        if !failures.is_empty() {
            bail!(
                "failed to delete {} branch(es):\n  {}",
                failures.len(),
                failures.join("\n  ")
            );
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_mocks::MockGitOps;

    fn remote_branch(short_name: &str) -> Branch {
        Branch {
            name: format!("upstream/{short_name}"),
            short_name: short_name.to_string(),
            remote: Some("upstream".to_string()),
        }
    }

    #[test]
    fn test_plan_unions_merged_sets_and_protects_release_branches() {
        let git = MockGitOps::new()
            .with_remote_branches(vec![
                remote_branch("main"),
                remote_branch("release-1.30"),
                remote_branch("feature-upstream"),
            ])
            .with_merged("upstream/main", &["feature-x", "release-1.30"])
            .with_merged("upstream/release-1.30", &["feature-x", "feature-y", "main"]);

        let plan = PruneService::new(&git).plan().unwrap();

        assert_eq!(plan.release_branches.len(), 2);
        // feature-x under both release branches appears once; main and
        // release-1.30 are protected.
        assert_eq!(
            plan.prune,
            BTreeSet::from(["feature-x".to_string(), "feature-y".to_string()])
        );
        assert!(git.calls.borrow().contains(&"fetch upstream".to_string()));
    }

    #[test]
    fn test_plan_requires_release_branches() {
        let git = MockGitOps::new().with_remote_branches(vec![remote_branch("feature-only")]);
        let err = PruneService::new(&git).plan().unwrap_err();
        assert!(err.to_string().contains("release branches"));
    }

    #[test]
    fn test_execute_deletes_each_branch() {
        let git = MockGitOps::new();
        let plan = PrunePlan {
            release_branches: vec![remote_branch("main")],
            prune: BTreeSet::from(["feature-x".to_string(), "feature-y".to_string()]),
        };

        let deleted = PruneService::new(&git).execute(&plan).unwrap();
        assert_eq!(deleted, 2);
        let calls = git.calls.borrow();
        assert!(calls.contains(&"delete feature-x".to_string()));
        assert!(calls.contains(&"delete feature-y".to_string()));
    }

    #[test]
    fn test_execute_continues_past_failures() {
        let git = MockGitOps::new().with_failing_delete("feature-x");
        let plan = PrunePlan {
            release_branches: vec![remote_branch("main")],
            prune: BTreeSet::from(["feature-x".to_string(), "feature-y".to_string()]),
        };

        let err = PruneService::new(&git).execute(&plan).unwrap_err();
        assert!(err.to_string().contains("feature-x"));
        // The other branch was still deleted.
        assert!(git.calls.borrow().contains(&"delete feature-y".to_string()));
    }

    #[test]
    fn test_dry_run_is_a_plan_without_execute() {
        let git = MockGitOps::new()
            .with_remote_branches(vec![remote_branch("main")])
            .with_merged("upstream/main", &["feature-x"]);

        let plan = PruneService::new(&git).plan().unwrap();
        assert_eq!(plan.prune.len(), 1);
        assert!(
            git.calls
                .borrow()
                .iter()
                .all(|call| !call.starts_with("delete"))
        );
    }
}
