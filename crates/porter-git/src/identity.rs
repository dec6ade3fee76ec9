//! Local user identity used to recognize fork remotes.

/// The GitHub username assumed to own "my fork".
///
/// Resolved once per command invocation and injected into the operations
/// that need it, rather than read from the process environment at
/// arbitrary points. This keeps resolution deterministic and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user: Option<String>,
}

impl Identity {
    /// An identity with a known username.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// An identity with no known username; fork resolution by organization
    /// match will find zero candidates.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { user: None }
    }

    /// Resolve from the environment: `PORTER_GITHUB_USER` overrides, with
    /// `USER` as the generic fallback.
    #[must_use]
    pub fn from_env() -> Self {
        let user = std::env::var("PORTER_GITHUB_USER")
            .or_else(|_| std::env::var("USER"))
            .ok()
            .filter(|user| !user.is_empty());
        Self { user }
    }

    /// The username, if one is known.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identity() {
        let identity = Identity::new("alice");
        assert_eq!(identity.user(), Some("alice"));
    }

    #[test]
    fn test_unknown_identity() {
        assert_eq!(Identity::unknown().user(), None);
    }
}
