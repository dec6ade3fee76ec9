//! Trait abstractions for git operations.
//!
//! `GitOps` abstracts the repository operations used by the workflow
//! services, allowing for:
//! - Dependency injection in commands/services
//! - Mock implementations for testing
//! - Alternative implementations (e.g., dry-run mode)

use crate::branch::Branch;
use crate::error::Result;
use crate::identity::Identity;
use crate::remote::{Remote, UrlPolicy};
use crate::repository::PushOptions;

/// Repository operations consumed by the workflow layer.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    // === Branch operations ===

    /// Current branch from the symbolic HEAD reference.
    fn current_branch(&self) -> Result<Branch>;

    /// Checkout an existing branch.
    fn checkout(&self, branch: &Branch) -> Result<()>;

    /// Create a branch starting at `from` and switch to it.
    fn checkout_new_branch(&self, name: &str, from: &Branch) -> Result<Branch>;

    /// Force-delete a local branch.
    fn delete_branch(&self, name: &str) -> Result<()>;

    /// Cherry-pick the given commits, oldest first.
    fn cherry_pick(&self, shas: &[String]) -> Result<()>;

    /// Push the current branch to a remote.
    fn push(&self, remote: &Remote, options: PushOptions) -> Result<()>;

    /// Fetch a remote.
    fn fetch_remote(&self, remote: &Remote) -> Result<()>;

    // === Remote resolution ===

    /// Resolve the contributor's fork remote, memoizing the choice.
    fn fork_remote(&self, identity: &Identity, urls: UrlPolicy) -> Result<Remote>;

    /// Resolve the canonical upstream remote, memoizing the choice.
    fn upstream_remote(&self) -> Result<Remote>;

    /// The upstream remote's `main`/`master` branch.
    fn find_upstream_branch(&self) -> Result<Branch>;

    /// Remote-tracking branches of one remote.
    fn list_remote_branches(&self, remote: &Remote) -> Result<Vec<Branch>>;

    /// Local branches already merged into `target`.
    fn merged_branches(&self, target: &Branch) -> Result<Vec<String>>;

    // === Index operations ===

    /// The working-tree diff with zero lines of context.
    fn unstaged_diff(&self) -> Result<String>;

    /// Apply a zero-context patch to the index.
    fn apply_to_index(&self, patch: &str) -> Result<()>;
}
