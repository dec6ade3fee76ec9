//! Subprocess execution of the git binary.
//!
//! Two modes: captured (stdout/stderr buffered, exit code inspected) and
//! interactive (streams inherited from the controlling terminal, for
//! commands that need a pager, editor, or live rebase session).

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};

/// Captured output of one git invocation.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output (empty in interactive mode).
    pub stdout: String,
    /// Captured standard error (empty in interactive mode).
    pub stderr: String,
    /// The child's exit code.
    pub exit_code: i32,
}

/// Executes git with a fixed working directory.
///
/// The trait seam lets tests substitute scripted output for real
/// subprocess calls, and callers provide dry-run implementations.
pub trait Runner {
    /// Run git with captured stdout/stderr.
    ///
    /// # Errors
    /// Returns [`Error::CommandFailed`] (carrying the captured output) on
    /// non-zero exit, or [`Error::Spawn`] if git could not be started.
    fn run(&self, args: &[&str]) -> Result<ExecResult>;

    /// Run git with captured output, feeding `input` to its stdin.
    ///
    /// # Errors
    /// Same failure modes as [`Runner::run`].
    fn run_with_input(&self, args: &[&str], input: &str) -> Result<ExecResult>;

    /// Run git attached to the caller's terminal. Output is not captured.
    ///
    /// # Errors
    /// Same failure modes as [`Runner::run`], with empty captured output.
    fn run_interactive(&self, args: &[&str]) -> Result<ExecResult>;
}

/// [`Runner`] that spawns the real `git` binary.
#[derive(Debug, Clone)]
pub struct GitRunner {
    dir: PathBuf,
}

impl GitRunner {
    /// Create a runner rooted at the given working directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Runner for GitRunner {
    fn run(&self, args: &[&str]) -> Result<ExecResult> {
        tracing::debug!("running {}", command_line(args));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|source| Error::Spawn {
                command: command_line(args),
                source,
            })?;

        finish(args, output.status, &output.stdout, &output.stderr)
    }

    fn run_with_input(&self, args: &[&str], input: &str) -> Result<ExecResult> {
        tracing::debug!("running {} (with stdin)", command_line(args));

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                command: command_line(args),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        finish(args, output.status, &output.stdout, &output.stderr)
    }

    fn run_interactive(&self, args: &[&str]) -> Result<ExecResult> {
        tracing::debug!("running {}", command_line(args));

        let status = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .status()
            .map_err(|source| Error::Spawn {
                command: command_line(args),
                source,
            })?;

        finish(args, status, &[], &[])
    }
}

fn command_line(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn finish(args: &[&str], status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Result<ExecResult> {
    let stdout = String::from_utf8_lossy(stdout).into_owned();
    let stderr = String::from_utf8_lossy(stderr).into_owned();
    let exit_code = status.code().unwrap_or(-1);

    if status.success() {
        Ok(ExecResult {
            stdout,
            stderr,
            exit_code,
        })
    } else {
        Err(Error::CommandFailed {
            command: command_line(args),
            exit_code,
            stdout,
            stderr,
        })
    }
}
