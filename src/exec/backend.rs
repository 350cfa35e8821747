// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! [`run_task_list`](super::run_task_list) talks to an `ExecutorBackend`
//! instead of spawning processes itself, so tests can swap in a fake that
//! records commands while production uses [`ShellExecutor`].

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::command::run_shell_command;

/// One command line of a task, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Key of the task the command belongs to.
    pub task: String,
    pub command: String,
    /// Extra environment variables for the child.
    pub env: BTreeMap<String, String>,
}

/// Exit code plus captured output lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `-1` when the process was terminated by a signal.
    pub code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Trait abstracting how task commands are executed.
pub trait ExecutorBackend: Send {
    /// Run a single command to completion.
    ///
    /// A non-zero exit is reported through [`CommandOutput::code`]; `Err` is
    /// reserved for failures to run the command at all.
    fn run_command(
        &mut self,
        request: CommandRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + '_>>;
}

/// Runs each command through a shell (`sh -c` by default).
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: Vec<String>,
}

impl ShellExecutor {
    /// `shell` is the program followed by its leading arguments; the command
    /// line is appended as the last argument.
    pub fn new(shell: Vec<String>) -> Self {
        Self { shell }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(crate::config::model::default_shell())
    }
}

impl ExecutorBackend for ShellExecutor {
    fn run_command(
        &mut self,
        request: CommandRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + '_>> {
        Box::pin(async move { Ok(run_shell_command(&self.shell, &request).await?) })
    }
}
