//! Trait abstractions for forge API operations.
//!
//! `ForgeApi` abstracts the read-only pull request lookups, allowing for:
//! - Dependency injection in commands/services
//! - Mock implementations for testing

use crate::error::Result;
use crate::types::{PullRequest, PullRequestCommit};

/// Read-only pull request lookups against a forge.
///
/// Methods take `org` and `repo` as parameters to support operations
/// across different repositories.
pub trait ForgeApi {
    /// Get a pull request by number.
    ///
    /// # Errors
    /// Returns [`crate::Error::PrNotFound`] when the number does not exist.
    fn get_pr(&self, org: &str, repo: &str, number: u64) -> Result<PullRequest>;

    /// The commits of a pull request, oldest first.
    ///
    /// # Errors
    /// Fails when the commit listing does not fit on one page.
    fn list_pr_commits(&self, org: &str, repo: &str, number: u64)
    -> Result<Vec<PullRequestCommit>>;
}
