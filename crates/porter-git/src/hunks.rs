//! Unified-diff partitioning for selective staging.
//!
//! A zero-context diff decomposes into an ordered sequence of hunks, each
//! carrying a snapshot of the file preamble it belongs to so that the
//! reassembled subset remains a valid patch.

use regex::Regex;

/// One hunk of a unified diff: the file preamble plus one `@@` block.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// The `diff --git`, `index`, `---`, `+++` lines for the containing
    /// file, newline-terminated.
    pub header: String,
    /// The `@@` line and the added/removed lines that follow it,
    /// newline-terminated.
    pub content: String,
}

impl Hunk {
    /// Whether `pattern` matches anywhere in the hunk body.
    ///
    /// Header lines are excluded from matching but are always emitted
    /// verbatim when a hunk is selected - the patch-apply step needs the
    /// preamble to know which file and offsets to target.
    #[must_use]
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.content)
    }
}

/// Split a unified diff (produced with zero context lines) into hunks,
/// order preserved from the source.
#[must_use]
pub fn parse_diff(diff: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut header_lines: Vec<&str> = Vec::new();
    let mut current: Option<Hunk> = None;

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            // New file section: reset the accumulated header.
            header_lines = vec![line];
        } else if line.starts_with("---") || line.starts_with("+++") || line.starts_with("index") {
            header_lines.push(line);
        } else if line.starts_with("@@") {
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            let mut header = header_lines.join("\n");
            header.push('\n');
            current = Some(Hunk {
                header,
                content: format!("{line}\n"),
            });
        } else if let Some(hunk) = current.as_mut() {
            hunk.content.push_str(line);
            hunk.content.push('\n');
        }
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }
    hunks
}

/// Concatenate hunks back into a patch suitable for `git apply`.
#[must_use]
pub fn assemble_patch<'a>(hunks: impl IntoIterator<Item = &'a Hunk>) -> String {
    let mut patch = String::new();
    for hunk in hunks {
        patch.push_str(&hunk.header);
        patch.push_str(&hunk.content);
    }
    patch
}
