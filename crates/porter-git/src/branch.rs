//! Branch snapshots.

/// A branch as observed at listing time. Read-only - no live tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Full name, e.g. `origin/main`.
    pub name: String,
    /// Name without the remote prefix, e.g. `main`.
    pub short_name: String,
    /// Owning remote; absent for local branches.
    pub remote: Option<String>,
}

impl Branch {
    /// A local branch, where full and short names coincide.
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            name,
            remote: None,
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
