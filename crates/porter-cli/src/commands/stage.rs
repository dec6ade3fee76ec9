//! `porter stage` command - stage hunks matching a pattern.

use anyhow::{Context, Result};
use porter_git::Repository;

use crate::output;
use crate::services::StageService;

/// Run the stage command.
pub fn run(pattern: &str, preview: bool) -> Result<()> {
    let repo = Repository::open_current().context("not inside a git repository")?;
    let service = StageService::new(&repo);

    let selection = service.select(pattern)?;
    if selection.hunks.is_empty() {
        output::warn("no hunks matched the pattern");
        return Ok(());
    }

    if preview {
        output::warn(&format!(
            "previewing {} hunk(s) matching {pattern:?}:",
            selection.hunks.len()
        ));
        output::essential(&selection.patch());
        return Ok(());
    }

    service.apply(&selection)?;
    output::success(&format!("staged {} hunk(s)", selection.hunks.len()));
    Ok(())
}
