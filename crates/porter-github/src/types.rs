//! Domain types for GitHub API responses.

use serde::Deserialize;

/// A pull request, reduced to the fields the workflows consume.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,
    /// PR title.
    pub title: String,
    /// PR body, `None` when empty.
    pub body: Option<String>,
    /// Web URL of the PR.
    pub html_url: String,
}

/// One commit of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestCommit {
    /// Full commit SHA.
    pub sha: String,
}
