//! Error types for porter-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory did not respond to a configuration probe.
    #[error("failed to open git repository at {}: {source}", dir.display())]
    NotARepository {
        /// Directory that was probed.
        dir: PathBuf,
        /// The underlying probe failure.
        #[source]
        source: Box<Error>,
    },

    /// The git binary exited non-zero. Carries the captured output so
    /// callers can echo the tool's own diagnostic.
    #[error("error running `{command}` (exit code {exit_code}): {stderr}")]
    CommandFailed {
        /// The full command line that was run.
        command: String,
        /// The child's exit code.
        exit_code: i32,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The git binary could not be spawned at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// The full command line that was attempted.
        command: String,
        /// The spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// Tool output did not match the expected line shape. Fatal, never
    /// skipped - a silent misparse could corrupt branch or remote state.
    #[error("cannot parse line {line:?} from `{command}` (expected {expected})")]
    Parse {
        /// The offending line.
        line: String,
        /// The command that produced it.
        command: String,
        /// What the line was expected to look like.
        expected: &'static str,
    },

    /// A config key expected to be a singleton was set more than once.
    #[error("found duplicate config key {0:?}")]
    DuplicateConfigKey(String),

    /// `git remote -v` reported two fetch (or push) entries for one name.
    #[error("found multiple {kind} urls for remote {remote:?}")]
    DuplicateRemoteUrl {
        /// The remote with conflicting entries.
        remote: String,
        /// Either "fetch" or "push".
        kind: &'static str,
    },

    /// Remote not found.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// No candidate remote for the given role.
    #[error(
        "cannot determine any {role} remote for pull requests, consider setting `git config {config_key} <name>`"
    )]
    NoRemoteCandidate {
        /// Either "fork" or "upstream".
        role: &'static str,
        /// The config key that would disambiguate.
        config_key: &'static str,
    },

    /// Several equally valid candidate remotes; never auto-resolved.
    #[error(
        "cannot determine unique {role} remote for pull requests (candidates: {}), consider setting `git config {config_key} <name>`",
        .candidates.join(", ")
    )]
    AmbiguousRemote {
        /// Either "fork" or "upstream".
        role: &'static str,
        /// Every candidate that was found.
        candidates: Vec<String>,
        /// The config key that would disambiguate.
        config_key: &'static str,
    },

    /// The upstream remote has no `main` or `master` branch.
    #[error("cannot determine any upstream branch on remote {remote:?} (expected main or master)")]
    NoUpstreamBranch {
        /// The upstream remote that was searched.
        remote: String,
    },

    /// The upstream remote has both `main` and `master`.
    #[error("cannot determine unique upstream branch (candidates: {})", .candidates.join(", "))]
    AmbiguousUpstreamBranch {
        /// Every candidate branch name.
        candidates: Vec<String>,
    },

    /// HEAD did not resolve to a branch name.
    #[error("cannot find current branch (stdout was {stdout:?}, stderr was {stderr:?})")]
    UnbornHead {
        /// What `rev-parse` printed to stdout.
        stdout: String,
        /// What `rev-parse` printed to stderr.
        stderr: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
