// src/exec/command.rs

//! Process spawning for a single command line.

use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::{CommandOutput, CommandRequest};

/// Spawn `shell... command`, stream its output to the log and capture it.
///
/// The child is killed if the returned future is dropped (e.g. on Ctrl-C).
pub async fn run_shell_command(shell: &[String], request: &CommandRequest) -> Result<CommandOutput> {
    let (program, args) = shell
        .split_first()
        .ok_or_else(|| anyhow!("no shell configured to run '{}'", request.command))?;

    debug!(
        task = %request.task,
        cmd = %request.command,
        "spawning command"
    );

    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(&request.command)
        .envs(&request.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", request.task))?;

    let stdout = child.stdout.take().map(|s| collect_lines(s, request.task.clone(), false));
    let stderr = child.stderr.take().map(|s| collect_lines(s, request.task.clone(), true));

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", request.task))?;

    let code = status.code().unwrap_or(-1);
    let output = CommandOutput {
        code,
        stdout: join_lines(stdout).await,
        stderr: join_lines(stderr).await,
    };

    if output.success() {
        debug!(task = %request.task, exit_code = code, "command finished");
    } else {
        warn!(task = %request.task, exit_code = code, cmd = %request.command, "command failed");
    }

    Ok(output)
}

fn collect_lines<R>(reader: R, task: String, is_stderr: bool) -> JoinHandle<Vec<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        let mut captured = Vec::new();
        while let Ok(Some(line)) = lines.next_line().await {
            if is_stderr {
                debug!(task = %task, "stderr: {}", line);
            } else {
                info!(task = %task, "{}", line);
            }
            captured.push(line);
        }
        captured
    })
}

async fn join_lines(handle: Option<JoinHandle<Vec<String>>>) -> Vec<String> {
    match handle {
        Some(h) => h.await.unwrap_or_default(),
        None => Vec::new(),
    }
}
