//! Workspace manifest parsing.
//!
//! The manifest is scanned line by line rather than parsed as a structured
//! document: membership glob patterns are the only content the orchestrator
//! needs, and they are exactly the dash-prefixed lines.

use std::path::Path;

use crate::types::{MonoflowError, MonoflowResult};

/// File the workspace root must carry to be a workspace.
pub const WORKSPACE_MANIFEST: &str = "pnpm-workspace.yaml";

/// Extract membership glob patterns from workspace manifest contents.
///
/// A line whose trimmed form begins with a dash contributes one pattern,
/// with surrounding single or double quotes stripped. Every other line is
/// ignored.
pub fn parse_member_patterns(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| {
            let pattern = line.trim().strip_prefix('-')?;
            let pattern = pattern.trim().trim_matches(|c| c == '\'' || c == '"');
            if pattern.is_empty() {
                None
            } else {
                Some(pattern.to_string())
            }
        })
        .collect()
}

/// Read the workspace manifest under `workspace_root` and return its
/// membership patterns.
pub fn load_member_patterns(workspace_root: &Path) -> MonoflowResult<Vec<String>> {
    let manifest_path = workspace_root.join(WORKSPACE_MANIFEST);
    let contents = std::fs::read_to_string(&manifest_path).map_err(|e| {
        MonoflowError::Workspace(format!(
            "failed to read workspace manifest {}: {}",
            manifest_path.display(),
            e
        ))
    })?;
    Ok(parse_member_patterns(&contents))
}
