// src/exec/runner.rs

//! Sequential execution of an ordered task list.

use tracing::{info, warn};

use crate::errors::{Result, RunGraphError};
use crate::tasks::Task;

use super::backend::{CommandRequest, ExecutorBackend};

/// What a successful [`run_task_list`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecReport {
    /// Keys of the tasks whose commands all succeeded, in run order.
    pub completed: Vec<String>,
    /// Keys of the tasks that had no `cmd` attribute.
    pub skipped: Vec<String>,
    pub commands: usize,
}

/// Run every command of every task, in order, stopping at the first failure.
///
/// `tasks` must already be in dependency order (as returned by
/// [`crate::tasks::extract_tasks`]).
pub async fn run_task_list<B>(backend: &mut B, tasks: &[Task]) -> Result<ExecReport>
where
    B: ExecutorBackend + ?Sized,
{
    let mut report = ExecReport::default();

    for task in tasks {
        if task.cmds.is_empty() {
            warn!(task = %task.key, "task has no commands, skipping");
            report.skipped.push(task.key.clone());
            continue;
        }

        info!(task = %task.key, description = %task.description, "running task");

        for cmd in &task.cmds {
            let output = backend
                .run_command(CommandRequest {
                    task: task.key.clone(),
                    command: cmd.clone(),
                    env: task.env.clone(),
                })
                .await?;
            report.commands += 1;

            if !output.success() {
                return Err(RunGraphError::TaskFailed {
                    task: task.key.clone(),
                    code: output.code,
                });
            }
        }

        report.completed.push(task.key.clone());
    }

    Ok(report)
}
