// src/app.rs

//! Command implementations behind the CLI.
//!
//! Every command takes a list of selection strings. Arguments are handled
//! independently: a failing one is logged and skipped, and the command
//! reports [`RunGraphError::SelectionsFailed`] once all arguments are done.
//! The exception is a failing task during `exec`, which stops everything.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::catalog::{Catalog, Resolved};
use crate::dot;
use crate::errors::{Result, RunGraphError};
use crate::exec::{run_task_list, ExecReport, ExecutorBackend};
use crate::fs::FileSystem;
use crate::graph::DependencyGraph;
use crate::selection::Selection;
use crate::tasks::{extract_task_list, extract_tasks, TaskMarkers};

/// Graph file picked up from the working directory when none is configured.
pub const DEFAULT_GRAPH_FILE: &str = "graph.dot";

/// Read and decode the dependency graph.
///
/// Without a configured path, `graph.dot` is used if it exists, otherwise
/// the built-in example graph.
pub fn load_graph(fs: &dyn FileSystem, path: Option<&Path>) -> Result<DependencyGraph> {
    let default = Path::new(DEFAULT_GRAPH_FILE);
    let source = match path {
        Some(p) => {
            debug!(path = %p.display(), "reading graph");
            fs.read_to_string(p)?
        }
        None if fs.is_file(default) => {
            debug!(path = %default.display(), "reading graph");
            fs.read_to_string(default)?
        }
        None => {
            warn!(
                "no graph given and no {} found, using the built-in example graph",
                DEFAULT_GRAPH_FILE
            );
            dot::EXAMPLE_GRAPH.to_string()
        }
    };

    let graph = dot::decode(&source)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded dependency graph"
    );
    Ok(DependencyGraph::new(graph))
}

/// Parse and resolve each argument, calling `f` on the successes.
fn for_each_selection<F>(catalog: &Catalog, selections: &[String], mut f: F) -> Result<()>
where
    F: FnMut(Resolved<'_>) -> Result<()>,
{
    let mut failed = 0;
    for arg in selections {
        let outcome = Selection::parse(arg)
            .and_then(|s| catalog.resolve(&s))
            .and_then(&mut f);
        if let Err(err) = outcome {
            error!(selection = %arg, error = %err, "selection failed");
            failed += 1;
        }
    }
    finish(failed)
}

fn finish(failed: usize) -> Result<()> {
    if failed > 0 {
        Err(RunGraphError::SelectionsFailed(failed))
    } else {
        Ok(())
    }
}

/// Write the selected subgraphs as `<name>.dot` into `output`.
///
/// Without selections every leaf subgraph is written as `<leaf>.dot`.
/// Returns the written paths.
pub fn induce(
    fs: &dyn FileSystem,
    graph: &DependencyGraph,
    output: &Path,
    selections: &[String],
) -> Result<Vec<PathBuf>> {
    let catalog = Catalog::build(graph)?;
    fs.create_dir_all(output)?;

    let mut written = Vec::new();
    let mut write = |name: &str, sub: &DependencyGraph| -> Result<()> {
        let path = output.join(format!("{name}.dot"));
        fs.write(&path, dot::encode(sub.graph()).as_bytes())?;
        info!(path = %path.display(), nodes = sub.graph().node_count(), "wrote subgraph");
        written.push(path);
        Ok(())
    };

    if selections.is_empty() {
        for (key, sub) in catalog.leafs() {
            write(key, sub)?;
        }
        return Ok(written);
    }

    for_each_selection(&catalog, selections, |r| write(&r.name, &r.graph))?;
    Ok(written)
}

/// Print `[name]` followed by the ordered task keys of each selection.
///
/// Without selections every leaf subgraph is listed.
pub fn list(
    graph: &DependencyGraph,
    markers: &TaskMarkers,
    selections: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let catalog = Catalog::build(graph)?;

    let mut print = |name: &str, sub: &DependencyGraph| -> Result<()> {
        let tasks = extract_task_list(sub, markers)?;
        writeln!(out, "[{name}]")?;
        for task in tasks {
            writeln!(out, "  {task}")?;
        }
        Ok(())
    };

    if selections.is_empty() {
        let mut failed = 0;
        for (key, sub) in catalog.leafs() {
            if let Err(err) = print(&format!("{key}.rv"), sub) {
                error!(leaf = %key, error = %err, "listing failed");
                failed += 1;
            }
        }
        return finish(failed);
    }

    for_each_selection(&catalog, selections, |r| print(&r.name, &r.graph))
}

/// Run the tasks of each selection in dependency order.
///
/// Selections that cannot be resolved are skipped; a failing task aborts
/// with [`RunGraphError::TaskFailed`].
pub async fn exec<B>(
    graph: &DependencyGraph,
    markers: &TaskMarkers,
    selections: &[String],
    backend: &mut B,
) -> Result<Vec<ExecReport>>
where
    B: ExecutorBackend + ?Sized,
{
    let catalog = Catalog::build(graph)?;

    let mut plans = Vec::new();
    for_each_selection(&catalog, selections, |r| {
        plans.push((r.name, extract_tasks(&r.graph, markers)?));
        Ok(())
    })
    .or_else(|err| match err {
        // Run what resolved; the failure count is reported afterwards.
        RunGraphError::SelectionsFailed(_) if !plans.is_empty() => {
            warn!("running the selections that resolved");
            Ok(())
        }
        other => Err(other),
    })?;

    let resolved = plans.len();
    let mut reports = Vec::with_capacity(resolved);
    for (name, tasks) in plans {
        info!(selection = %name, tasks = tasks.len(), "executing selection");
        let report = run_task_list(backend, &tasks).await?;
        info!(
            selection = %name,
            completed = report.completed.len(),
            commands = report.commands,
            "selection done"
        );
        reports.push(report);
    }

    finish(selections.len() - resolved)?;
    Ok(reports)
}

/// Print the roots and leafs of the graph, one key per line.
pub fn roles(graph: &DependencyGraph, out: &mut dyn Write) -> Result<()> {
    let roles = graph.roles();
    writeln!(out, "roots:")?;
    for key in roles.root_keys() {
        writeln!(out, "  {key}")?;
    }
    writeln!(out, "leafs:")?;
    for key in roles.leaf_keys() {
        writeln!(out, "  {key}")?;
    }
    Ok(())
}
