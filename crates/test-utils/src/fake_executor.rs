use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rungraph::errors::Result;
use rungraph::exec::{CommandOutput, CommandRequest, ExecutorBackend};

/// A fake executor that:
/// - records every command it is asked to run, in order
/// - exits with code 1 for tasks listed in `failing`, 0 otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    executed: Arc<Mutex<Vec<CommandRequest>>>,
    failing: BTreeSet<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command of `task` fail.
    pub fn failing(mut self, task: &str) -> Self {
        self.failing.insert(task.to_string());
        self
    }

    pub fn requests(&self) -> Vec<CommandRequest> {
        self.executed.lock().unwrap().clone()
    }

    /// Task keys in execution order, one entry per command.
    pub fn tasks(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.task).collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.command).collect()
    }
}

impl ExecutorBackend for RecordingExecutor {
    fn run_command(
        &mut self,
        request: CommandRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let code = if self.failing.contains(&request.task) { 1 } else { 0 };

        Box::pin(async move {
            executed.lock().unwrap().push(request);
            Ok(CommandOutput {
                code,
                ..CommandOutput::default()
            })
        })
    }
}
