//! Monoflow Core Library
//!
//! This is the core library for the monoflow workspace task orchestrator. It
//! discovers member packages from workspace glob patterns, infers an
//! intra-workspace dependency order from their manifests, and executes a
//! named task across them with a per-task concurrency policy.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`workspace_manager`] - High-level orchestration interface
//! - [`workspace`] - Package discovery, dependency graph, topological order
//! - [`tiers`] - Library/application staging classification
//! - [`execution`] - Scheduling policies and child-process launching
//! - [`configs`] - Workspace and package manifest parsing
//! - [`tasks`] - Task names and console labeling
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The primary entry point is the [`WorkspaceManager`]:
//!
//! ```rust,no_run
//! use monoflow_core::tasks::TaskKind;
//! use monoflow_core::workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> monoflow_core::types::MonoflowResult<()> {
//! let manager = WorkspaceManager::new(WorkspaceManagerConfig {
//!     workspace_root: PathBuf::from("."),
//!     package_manager: "pnpm".to_string(),
//! })?;
//!
//! manager.run_task(TaskKind::Build).await?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod tasks;
pub mod tiers;
pub mod types;
pub mod workspace;
pub mod workspace_manager;

// Re-export the main types for easier usage
pub use tasks::TaskKind;
pub use types::{MonoflowError, MonoflowResult};
pub use workspace_manager::{WorkspaceManager, WorkspaceManagerConfig};
