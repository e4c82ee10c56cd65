use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::*;
use monoflow_core::tasks::TaskKind;
use monoflow_core::workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};

/// Monoflow - a dependency-aware workspace task orchestrator
#[derive(Parser)]
#[command(name = "monoflow")]
#[command(about = "Run build/dev/start across a workspace in dependency order")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Package-manager executable used to install and run scripts
    #[arg(long, default_value = "pnpm")]
    package_manager: String,

    /// Task to run across the workspace
    #[arg(value_enum)]
    task: Task,
}

#[derive(Clone, Copy, ValueEnum)]
enum Task {
    /// Install once, then build libraries and applications in staged parallel batches
    Build,
    /// Run every package's dev script one at a time in dependency order
    Dev,
    /// Start all applications concurrently
    Start,
}

impl From<Task> for TaskKind {
    fn from(task: Task) -> Self {
        match task {
            Task::Build => TaskKind::Build,
            Task::Dev => TaskKind::Dev,
            Task::Start => TaskKind::Start,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let task = TaskKind::from(cli.task);

    println!("{} {}", "Running task".bold(), task.as_str().cyan());
    println!();

    let manager = WorkspaceManager::new(WorkspaceManagerConfig {
        workspace_root: cli.workspace,
        package_manager: cli.package_manager,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize workspace: {}", e))?;

    manager
        .run_task(task)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run task: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "All tasks completed successfully!".green().bold()
    );

    Ok(())
}
