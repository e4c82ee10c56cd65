//! High-level workspace orchestration interface
//!
//! This module provides the [`WorkspaceManager`] which serves as the
//! primary entry point: it discovers the workspace once up front and then
//! executes tasks against it. The workspace root and the package-manager
//! command are explicit configuration, so callers (and tests) can drive
//! several synthetic workspaces from one process without touching global
//! state.

use std::path::PathBuf;

use colored::*;

use crate::execution::runner::{TaskRunner, TaskRunnerConfig};
use crate::tasks::TaskKind;
use crate::types::MonoflowResult;
use crate::workspace::Workspace;

/// Configuration for initializing a workspace manager
pub struct WorkspaceManagerConfig {
    pub workspace_root: PathBuf,
    /// Package-manager executable used for installs and script runs.
    pub package_manager: String,
}

impl Default for WorkspaceManagerConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            package_manager: "pnpm".to_string(),
        }
    }
}

/// High-level workspace manager that encapsulates discovery and execution
pub struct WorkspaceManager {
    pub workspace: Workspace,
    config: WorkspaceManagerConfig,
}

impl WorkspaceManager {
    /// Discover the workspace under `config.workspace_root` and build its
    /// dependency graph.
    pub fn new(config: WorkspaceManagerConfig) -> MonoflowResult<Self> {
        let workspace = Workspace::discover(&config.workspace_root)?;
        Ok(Self { workspace, config })
    }

    /// Execute a task across the workspace under its scheduling policy.
    pub async fn run_task(&self, task: TaskKind) -> MonoflowResult<()> {
        self.warn_on_cycles();

        let runner = TaskRunner::new(
            &self.workspace,
            TaskRunnerConfig {
                package_manager: self.config.package_manager.clone(),
            },
        );
        runner.run(task).await
    }

    /// Dependency cycles never abort a run, but they make the resulting
    /// order best-effort, so they are worth a warning up front.
    fn warn_on_cycles(&self) {
        if self.workspace.dependency_cycles.is_empty() {
            return;
        }

        let description = self
            .workspace
            .dependency_cycles
            .iter()
            .map(|cycle| {
                let mut path = cycle.clone();
                if let Some(first) = path.first().cloned() {
                    path.push(first);
                }
                path.join(" -> ")
            })
            .collect::<Vec<_>>()
            .join("; ");

        eprintln!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("circular dependencies detected: {}", description).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn new_discovers_the_workspace() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("pnpm-workspace.yaml"), "packages:\n  - 'packages/*'\n").unwrap();
        fs::create_dir_all(root.join("packages/a")).unwrap();
        fs::write(
            root.join("packages/a/package.json"),
            r#"{ "name": "a" }"#,
        )
        .unwrap();

        let manager = WorkspaceManager::new(WorkspaceManagerConfig {
            workspace_root: root.to_path_buf(),
            package_manager: "pnpm".to_string(),
        })
        .unwrap();

        assert_eq!(manager.workspace.packages.len(), 1);
        assert_eq!(manager.workspace.packages[0].name, "a");
    }

    #[test]
    fn new_fails_without_a_workspace_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = WorkspaceManager::new(WorkspaceManagerConfig {
            workspace_root: temp_dir.path().to_path_buf(),
            package_manager: "pnpm".to_string(),
        });
        assert!(result.is_err());
    }
}
