//! High-level task runner
//!
//! Applies the per-task scheduling policy: staged parallel batches for
//! `build`, one concurrent batch for `start`, and strictly sequential
//! dependency order for `dev`.

use colored::*;
use futures::future::join_all;

use crate::execution::command::ScriptRunner;
use crate::tasks::TaskKind;
use crate::tiers::{classify, Tier};
use crate::types::MonoflowResult;
use crate::workspace::{Package, Workspace};

/// Configuration for the task runner
#[derive(Debug, Clone)]
pub struct TaskRunnerConfig {
    /// Package-manager executable used for installs and script runs.
    pub package_manager: String,
}

impl Default for TaskRunnerConfig {
    fn default() -> Self {
        Self {
            package_manager: "pnpm".to_string(),
        }
    }
}

/// High-level task runner that coordinates task execution across packages
pub struct TaskRunner<'a> {
    workspace: &'a Workspace,
    scripts: ScriptRunner,
}

impl<'a> TaskRunner<'a> {
    pub fn new(workspace: &'a Workspace, config: TaskRunnerConfig) -> Self {
        Self {
            workspace,
            scripts: ScriptRunner::new(config.package_manager),
        }
    }

    /// Execute `task` across the workspace under the policy it selects.
    pub async fn run(&self, task: TaskKind) -> MonoflowResult<()> {
        let ordered = self.workspace.topological_order();
        let libraries: Vec<&Package> = ordered
            .iter()
            .copied()
            .filter(|p| classify(p) == Some(Tier::Library))
            .collect();
        let applications: Vec<&Package> = ordered
            .iter()
            .copied()
            .filter(|p| classify(p) == Some(Tier::Application))
            .collect();

        match task {
            TaskKind::Build => self.run_build(&libraries, &applications).await,
            TaskKind::Start => self.run_start(&applications).await,
            TaskKind::Dev => self.run_sequential(task, &ordered).await,
        }
    }

    /// `build`: one synchronous workspace install, then the library batch,
    /// then the application batch once every library has settled.
    /// Untiered packages take no part in build staging.
    async fn run_build(
        &self,
        libraries: &[&Package],
        applications: &[&Package],
    ) -> MonoflowResult<()> {
        self.scripts.install(&self.workspace.root).await?;

        if !libraries.is_empty() {
            println!("{}", "Building libraries in parallel...".yellow());
            self.run_batch(TaskKind::Build, libraries).await?;
            println!("{}", "All libraries built.".green());
        }

        if !applications.is_empty() {
            println!("{}", "Building applications in parallel...".yellow());
            self.run_batch(TaskKind::Build, applications).await?;
            println!("{}", "All applications built.".green());
        }

        Ok(())
    }

    /// `start`: launch every application concurrently. The children are
    /// typically long-running, so this resolves when all of them exit or
    /// any of them fails.
    async fn run_start(&self, applications: &[&Package]) -> MonoflowResult<()> {
        if applications.is_empty() {
            return Ok(());
        }
        println!("{}", "Starting applications...".yellow());
        self.run_batch(TaskKind::Start, applications).await
    }

    /// `dev`: one package at a time over the full topological order,
    /// libraries and applications alike, awaiting each child before the
    /// next launch.
    async fn run_sequential(&self, task: TaskKind, ordered: &[&Package]) -> MonoflowResult<()> {
        for package in ordered.iter().copied() {
            if !package.has_script(task.as_str()) {
                continue;
            }
            self.scripts.run_script(package, task).await?;
        }
        Ok(())
    }

    /// Launch the task for every qualifying batch member without waiting
    /// on siblings, then wait for all of them to settle. A failing member
    /// fails the aggregate, but already-launched siblings are not
    /// cancelled; they run to their own completion first.
    async fn run_batch(&self, task: TaskKind, batch: &[&Package]) -> MonoflowResult<()> {
        let launches: Vec<_> = batch
            .iter()
            .copied()
            .filter(|p| p.has_script(task.as_str()))
            .map(|p| self.scripts.run_script(p, task))
            .collect();

        let results = join_all(launches).await;
        if let Some(err) = results.into_iter().find_map(Result::err) {
            return Err(err);
        }
        Ok(())
    }
}
