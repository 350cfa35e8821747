#![allow(dead_code, unused_imports)]

pub use rungraph_test_utils::{
    abc_tasks, init_tracing, sorted_edges, sorted_keys, with_timeout, GraphBuilder,
    RecordingExecutor,
};

use rungraph::app;
use rungraph::errors::Result;
use rungraph::graph::DependencyGraph;
use rungraph::tasks::TaskMarkers;

/// Run `list` and return what it printed plus its result.
pub fn list_output(graph: &DependencyGraph, selections: &[&str]) -> (String, Result<()>) {
    let args: Vec<String> = selections.iter().map(|s| s.to_string()).collect();
    let mut buf = Vec::new();
    let res = app::list(graph, &TaskMarkers::default(), &args, &mut buf);
    (String::from_utf8(buf).expect("list output is UTF-8"), res)
}
