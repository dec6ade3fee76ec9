//! CLI argument definitions and command entry points.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub mod cherry;
pub mod completions;
pub mod forks;
pub mod pr;
pub mod prune;
pub mod rebase;
pub mod stage;
pub mod toc;
pub mod top;
pub mod workspace;

/// Fork-based pull request workflows for git and GitHub.
#[derive(Parser)]
#[command(name = "porter", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cherry-pick a pull request from upstream onto a branch
    ///
    /// Creates a branch named automated-cherry-pick-of-#<pr>-<target>,
    /// cherry-picks every commit of the PR, pushes the branch to your
    /// fork and opens a pull request against the target branch.
    Cherry {
        /// Pull request number on the upstream repository
        pr_number: u64,

        /// Target branch to cherry-pick onto (defaults to current branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Create a pull request from explicit commits
    ///
    /// Builds a branch from the upstream main branch, cherry-picks the
    /// given commits onto it, pushes to your fork and opens a PR.
    Pr {
        /// Name of the branch to create
        branch: String,

        /// Commits to cherry-pick, oldest first
        #[arg(required = true)]
        shas: Vec<String>,
    },

    /// Delete local branches merged into any upstream release branch
    Prune {
        /// Preview only, don't make changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the most recently changed local branches
    Top {
        /// Max number of branches to show
        #[arg(short = 'n', long = "limit", default_value_t = 10)]
        limit: usize,

        /// Positional alternative to --limit
        count: Option<usize>,
    },

    /// Switch to a contributor's branch, named as user:branch
    Workspace {
        /// Workspace in the format 'user:branch'
        name: String,
    },

    /// Stage only the diff hunks whose content matches a pattern
    Stage {
        /// Regex pattern to match hunks to stage
        #[arg(long)]
        pattern: String,

        /// Preview the hunks that would be staged without staging them
        #[arg(long)]
        preview: bool,
    },

    /// Normalize fork and upstream remotes and record them in config
    Forks {
        /// Don't rewrite the fork remote's URLs to canonical form
        #[arg(long)]
        no_fix_urls: bool,
    },

    /// Rebase the current branch onto the upstream main branch
    Rebase {
        /// Run rebase interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show the commits on this branch, oldest first
    Toc,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
