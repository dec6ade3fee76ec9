//! # porter-github
//!
//! GitHub API integration for Porter: pull request metadata and commit
//! listings used by the cherry-pick workflow.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod error;
mod traits;
mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use error::{Error, Result};
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use traits::ForgeApi;
pub use types::{PullRequest, PullRequestCommit};
