//! Task execution module
//!
//! This module launches package scripts through the external package
//! manager and coordinates the per-task scheduling policies.

pub mod command;
pub mod runner;

pub use command::ScriptRunner;
pub use runner::{TaskRunner, TaskRunnerConfig};
