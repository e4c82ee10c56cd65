//! Child process handling for package scripts.
//!
//! All real work is delegated to the external package manager; this module
//! launches `<pm> run <task>` (and the workspace-wide `<pm> install`) with
//! the right working directory and surfaces the child's exit status.

use std::path::Path;
use std::process::Stdio;

use colored::*;
use tokio::process::Command;

use crate::tasks::{get_package_color, TaskKind};
use crate::types::{MonoflowError, MonoflowResult};
use crate::workspace::Package;

/// Launches package-manager commands with all three standard streams
/// inherited, so concurrently running children interleave live on the
/// caller's terminal.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    package_manager: String,
}

impl ScriptRunner {
    pub fn new(package_manager: impl Into<String>) -> Self {
        Self {
            package_manager: package_manager.into(),
        }
    }

    /// Run `<pm> run <task>` inside the package directory and wait for the
    /// child to exit.
    pub async fn run_script(&self, package: &Package, task: TaskKind) -> MonoflowResult<()> {
        println!(
            "{} {} {}",
            "▶".bold(),
            task.as_str().bold(),
            format!("› {}", package.name).color(get_package_color(&package.name))
        );

        let status = Command::new(&self.package_manager)
            .arg("run")
            .arg(task.as_str())
            .current_dir(&package.directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(MonoflowError::TaskExecution {
                package: package.name.clone(),
                task: task.as_str().to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }

    /// Run the workspace-wide `<pm> install` step at the workspace root,
    /// synchronously with respect to all package tasks.
    pub async fn install(&self, workspace_root: &Path) -> MonoflowResult<()> {
        println!("{}", "Installing workspace dependencies...".blue());

        let status = Command::new(&self.package_manager)
            .arg("install")
            .current_dir(workspace_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(MonoflowError::Install {
                code: status.code().unwrap_or(-1),
            });
        }
        println!("{}", "Dependencies installed.".green());
        Ok(())
    }
}
