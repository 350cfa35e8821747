// tests/exec_tasks.rs

mod common;
use crate::common::{abc_tasks, init_tracing, with_timeout, GraphBuilder, RecordingExecutor};

use rungraph::app;
use rungraph::errors::RunGraphError;
use rungraph::exec::{run_task_list, ShellExecutor};
use rungraph::tasks::{extract_tasks, TaskMarkers};

fn args(selections: &[&str]) -> Vec<String> {
    selections.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn runs_tasks_in_dependency_order() {
    init_tracing();
    let graph = abc_tasks().dependency();
    let mut backend = RecordingExecutor::new();

    let reports = with_timeout(app::exec(
        &graph,
        &TaskMarkers::default(),
        &args(&["C"]),
        &mut backend,
    ))
    .await
    .unwrap();

    assert_eq!(backend.commands(), vec!["echo A", "echo B", "echo C"]);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].completed, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn stops_at_the_first_failing_task() {
    init_tracing();
    let graph = abc_tasks().dependency();
    let mut backend = RecordingExecutor::new().failing("B");

    let err = with_timeout(app::exec(
        &graph,
        &TaskMarkers::default(),
        &args(&["C", "A>"]),
        &mut backend,
    ))
    .await
    .unwrap_err();

    match err {
        RunGraphError::TaskFailed { task, code } => {
            assert_eq!(task, "B");
            assert_eq!(code, 1);
        }
        other => panic!("expected TaskFailed, got {other:?}"),
    }
    assert_eq!(backend.tasks(), vec!["A", "B"]);
}

#[tokio::test]
async fn unresolved_selections_do_not_block_the_rest() {
    init_tracing();
    let graph = abc_tasks().dependency();
    let mut backend = RecordingExecutor::new();

    let err = with_timeout(app::exec(
        &graph,
        &TaskMarkers::default(),
        &args(&["Z", "C|>B"]),
        &mut backend,
    ))
    .await
    .unwrap_err();

    assert!(matches!(err, RunGraphError::SelectionsFailed(1)));
    assert_eq!(backend.tasks(), vec!["A", "B"]);
}

#[tokio::test]
async fn multi_line_commands_and_environment() {
    init_tracing();
    let graph = GraphBuilder::new()
        .task("gen", "echo one\necho two")
        .attr("gen", "env.MODE", "release")
        .node("plain")
        .edge("plain", "gen")
        .dependency();
    let tasks = extract_tasks(&graph, &TaskMarkers::default()).unwrap();
    let mut backend = RecordingExecutor::new();

    let report = with_timeout(run_task_list(&mut backend, &tasks)).await.unwrap();

    assert_eq!(report.commands, 2);
    let requests = backend.requests();
    assert_eq!(requests[1].command, "echo two");
    assert_eq!(requests[0].env.get("MODE").map(String::as_str), Some("release"));
}

#[tokio::test]
async fn tasks_without_commands_are_skipped() {
    init_tracing();
    let graph = GraphBuilder::new()
        .attr("doc", "type", "job")
        .task("build", "make")
        .edge("doc", "build")
        .dependency();
    let tasks = extract_tasks(&graph, &TaskMarkers::default()).unwrap();
    let mut backend = RecordingExecutor::new();

    let report = with_timeout(run_task_list(&mut backend, &tasks)).await.unwrap();
    assert_eq!(report.skipped, vec!["doc"]);
    assert_eq!(report.completed, vec!["build"]);
}

#[cfg(unix)]
#[tokio::test]
async fn shell_executor_runs_real_commands() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("order.log");
    let log = log.display();

    let graph = GraphBuilder::new()
        .task("first", &format!("echo first >> '{log}'"))
        .task("second", &format!("echo \"$WHO\" >> '{log}'"))
        .attr("second", "env.WHO", "second")
        .task("third", "exit 7")
        .task("never", &format!("echo never >> '{log}'"))
        .chain(&["first", "second", "third", "never"])
        .dependency();
    let mut backend = ShellExecutor::default();

    let err = with_timeout(app::exec(
        &graph,
        &TaskMarkers::default(),
        &args(&["never"]),
        &mut backend,
    ))
    .await
    .unwrap_err();

    assert!(matches!(err, RunGraphError::TaskFailed { ref task, code: 7 } if task == "third"));
    let written = std::fs::read_to_string(dir.path().join("order.log")).unwrap();
    assert_eq!(written, "first\nsecond\n");
}
