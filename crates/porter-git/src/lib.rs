//! # porter-git
//!
//! Git operations layer for Porter, built on subprocess invocations of the
//! `git` binary. Provides repository, remote, and branch discovery by
//! parsing tool output, repository configuration access with write-through
//! caching, and unified-diff hunk partitioning for selective staging.

mod branch;
mod config;
mod error;
mod exec;
mod forge;
mod hunks;
mod identity;
mod remote;
mod repository;
mod traits;

pub use branch::Branch;
pub use config::GitConfig;
pub use error::{Error, Result};
pub use exec::{ExecResult, GitRunner, Runner};
pub use forge::ForgeInfo;
pub use hunks::{Hunk, assemble_patch, parse_diff};
pub use identity::Identity;
pub use remote::{Remote, UrlPolicy};
pub use repository::{FORK_REMOTE_KEY, PushOptions, Repository, UPSTREAM_REMOTE_KEY};
pub use traits::GitOps;
