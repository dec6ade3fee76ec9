//! Selective staging: stage only the diff hunks whose content matches a
//! pattern.

use anyhow::{Context, Result};
use porter_git::{GitOps, Hunk, assemble_patch, parse_diff};
use regex::Regex;

/// The hunks selected for staging, in diff order.
#[derive(Debug, Clone)]
pub struct StageSelection {
    /// Matching hunks, each still carrying its file preamble.
    pub hunks: Vec<Hunk>,
    /// Total hunks in the working-tree diff.
    pub total: usize,
}

impl StageSelection {
    /// The selected hunks reassembled into an applicable patch.
    #[must_use]
    pub fn patch(&self) -> String {
        assemble_patch(&self.hunks)
    }
}

/// Service for selective staging.
pub struct StageService<'a> {
    git: &'a dyn GitOps,
}

impl<'a> StageService<'a> {
    /// Create a new stage service.
    pub fn new(git: &'a dyn GitOps) -> Self {
        Self { git }
    }

    /// Partition the working-tree diff and select matching hunks.
    ///
    /// # Errors
    /// Fails when the pattern is not a valid regex or the diff cannot be
    /// read.
    pub fn select(&self, pattern: &str) -> Result<StageSelection> {
        let regex =
            Regex::new(pattern).with_context(|| format!("invalid regex pattern {pattern:?}"))?;

        let diff = self.git.unstaged_diff()?;
        let hunks = parse_diff(&diff);
        let total = hunks.len();
        let hunks: Vec<Hunk> = hunks
            .into_iter()
            .filter(|hunk| hunk.matches(&regex))
            .collect();

        Ok(StageSelection { hunks, total })
    }

    /// Apply the selection to the index.
    ///
    /// # Errors
    /// Fails when `git apply` rejects the patch.
    pub fn apply(&self, selection: &StageSelection) -> Result<()> {
        self.git.apply_to_index(&selection.patch())?;
        Ok(())
    }
}
