//! Forge identification from remote URLs.

/// Where a remote points, derived from its URL.
///
/// A closed variant: consumers branch exhaustively, and new forges are
/// added by extending the variant set. An unrecognized URL shape yields
/// [`ForgeInfo::Unknown`] rather than an error so callers can skip
/// forge-specific behavior gracefully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgeInfo {
    /// URL shape not recognized.
    Unknown,
    /// A repository hosted on github.com.
    Github {
        /// Organization (or user) owning the repository.
        org: String,
        /// Repository name.
        repo: String,
    },
}

impl ForgeInfo {
    /// Parse a remote URL against the known GitHub shapes.
    ///
    /// Tries `https://github.com/<org>/<repo>[.git]` first, then the SSH
    /// shorthand `git@github.com:<org>/<repo>[.git]`. Exactly two
    /// non-empty path segments are required; any other count yields
    /// [`ForgeInfo::Unknown`].
    #[must_use]
    pub fn parse_url(url: &str) -> Self {
        if let Some(path) = url.strip_prefix("https://github.com/") {
            return Self::from_path(path);
        }
        if let Some(path) = url.strip_prefix("git@github.com:") {
            return Self::from_path(path);
        }
        Self::Unknown
    }

    fn from_path(path: &str) -> Self {
        let path = path.strip_suffix(".git").unwrap_or(path);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [org, repo] if !org.is_empty() && !repo.is_empty() => Self::Github {
                org: (*org).to_string(),
                repo: (*repo).to_string(),
            },
            _ => Self::Unknown,
        }
    }

    /// Canonical HTTPS fetch URL for a GitHub repository.
    #[must_use]
    pub fn https_url(org: &str, repo: &str) -> String {
        format!("https://github.com/{org}/{repo}")
    }

    /// Canonical SSH push URL for a GitHub repository.
    #[must_use]
    pub fn ssh_url(org: &str, repo: &str) -> String {
        format!("git@github.com:{org}/{repo}")
    }
}
