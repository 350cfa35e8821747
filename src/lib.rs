// src/lib.rs

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dot;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod graph;
pub mod logging;
pub mod selection;
pub mod tasks;

use tracing::{info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::Settings;
use crate::errors::{Result, RunGraphError};
use crate::exec::ShellExecutor;
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// Loads the graph named by `settings` and dispatches the subcommand.
pub async fn run(args: CliArgs, settings: Settings) -> Result<()> {
    let fs = RealFileSystem;
    let graph = app::load_graph(&fs, settings.graph.as_deref())?;

    match args.command {
        Command::Induce { selections } => {
            let written = app::induce(&fs, &graph, &settings.output, &selections)?;
            info!(files = written.len(), output = %settings.output.display(), "induce done");
        }
        Command::List { selections } => {
            let mut stdout = std::io::stdout().lock();
            app::list(&graph, &settings.markers, &selections, &mut stdout)?;
        }
        Command::Exec { selections } => {
            let mut backend = ShellExecutor::new(settings.shell.clone());

            // Ctrl-C drops the exec future, which kills the running child.
            tokio::select! {
                res = app::exec(&graph, &settings.markers, &selections, &mut backend) => {
                    res?;
                }
                _ = tokio::signal::ctrl_c() => {
                    warn!("interrupted, stopping task execution");
                    return Err(RunGraphError::Other(anyhow::anyhow!("interrupted")));
                }
            }
        }
        Command::Roles => {
            let mut stdout = std::io::stdout().lock();
            app::roles(&graph, &mut stdout)?;
        }
    }

    Ok(())
}
