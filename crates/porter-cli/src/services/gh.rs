//! Pull request creation through the `gh` CLI.
//!
//! PR creation is delegated to `gh pr create` so that the user's existing
//! authentication and interactive prompts keep working; the subprocess
//! inherits the terminal.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

/// A pull request to open: base branch, `org:branch` head, and optional
/// title/body. When title and body are absent, `gh` fills them from the
/// commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest {
    pub base: String,
    pub head: String,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Opens pull requests on the forge.
pub trait PrCreator {
    /// Open a pull request.
    ///
    /// # Errors
    /// Fails when the underlying tool exits non-zero.
    fn create(&self, request: &PrRequest) -> Result<()>;
}

/// [`PrCreator`] backed by the `gh` CLI.
pub struct GhCli;

impl PrCreator for GhCli {
    fn create(&self, request: &PrRequest) -> Result<()> {
        let mut args = vec![
            "pr".to_string(),
            "create".to_string(),
            "--base".to_string(),
            request.base.clone(),
            "--head".to_string(),
            request.head.clone(),
        ];

        match (&request.title, &request.body) {
            (Some(title), Some(_)) => {
                args.push("--title".to_string());
                args.push(title.clone());
                // Body is streamed on stdin to avoid argv length limits.
                args.push("--body-file".to_string());
                args.push("-".to_string());
            }
            _ => args.push("--fill".to_string()),
        }

        tracing::debug!(?args, "running gh");
        let mut command = Command::new("gh");
        command.args(&args);
        if request.body.is_some() {
            command.stdin(Stdio::piped());
        }

        let mut child = command.spawn().context("failed to run gh")?;
        if let Some(body) = &request.body {
            let mut stdin = child.stdin.take().context("failed to open gh stdin")?;
            stdin.write_all(body.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            bail!("gh pr create exited with {status}");
        }
        Ok(())
    }
}
