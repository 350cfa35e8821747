// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ExecutorBackend` trait and the production
//!   `ShellExecutor`; tests replace it with a recording fake.
//! - [`command`] spawns one command line with `tokio::process::Command`.
//! - [`runner`] walks an ordered task list and fails fast.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::{CommandOutput, CommandRequest, ExecutorBackend, ShellExecutor};
pub use runner::{run_task_list, ExecReport};
