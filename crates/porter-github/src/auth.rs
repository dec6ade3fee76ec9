//! Authentication handling for GitHub API.

use std::process::Command;

use secrecy::SecretString;

use crate::error::{Error, Result};

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Use token from gh CLI.
    GhCli,

    /// Use token from environment variable.
    EnvVar(String),

    /// Use a specific token.
    Token(SecretString),

    /// No authentication. Public repositories only, with the lower
    /// unauthenticated rate limit.
    Anonymous,
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Tries in order: `GITHUB_TOKEN` env var, gh CLI, anonymous.
    #[must_use]
    pub fn auto() -> Self {
        if std::env::var("GITHUB_TOKEN").is_ok() {
            Self::EnvVar("GITHUB_TOKEN".into())
        } else if gh_token().is_ok() {
            Self::GhCli
        } else {
            Self::Anonymous
        }
    }

    /// Resolve the authentication to a token, `None` for anonymous.
    ///
    /// # Errors
    /// Returns error if a required token cannot be obtained.
    pub fn resolve(&self) -> Result<Option<SecretString>> {
        match self {
            Self::GhCli => gh_token().map(Some),
            Self::EnvVar(var) => std::env::var(var)
                .map(|token| Some(token.into()))
                .map_err(|_| Error::NoToken),
            Self::Token(token) => Ok(Some(token.clone())),
            Self::Anonymous => Ok(None),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}

/// Get GitHub token from gh CLI.
fn gh_token() -> Result<SecretString> {
    let output = Command::new("gh").args(["auth", "token"]).output()?;

    if !output.status.success() {
        return Err(Error::NoToken);
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if token.is_empty() {
        return Err(Error::NoToken);
    }

    Ok(token.into())
}
