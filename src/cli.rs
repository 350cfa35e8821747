// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Command-line arguments for `rungraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rungraph",
    version,
    about = "Induce, order and run task subgraphs of a DOT dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `.rungraph.toml` in the current directory, then in `$HOME`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dependency graph in DOT format.
    ///
    /// Default: `graph.dot` if present, otherwise a built-in example graph.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub graph: Option<PathBuf>,

    /// Directory that `induce` writes subgraphs to.
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the config file, `RUNGRAPH_LOG` or a default level is used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write induced subgraphs as DOT files.
    ///
    /// Without selections, one `<leaf>.dot` file is written per leaf.
    Induce {
        /// Selections of the form `[>]LEAF[>][|[>]TASK[>]]`.
        #[arg(value_name = "SELECTION")]
        selections: Vec<String>,
    },

    /// Print the ordered task list of each selection.
    ///
    /// Without selections, every leaf subgraph is listed.
    List {
        #[arg(value_name = "SELECTION")]
        selections: Vec<String>,
    },

    /// Run the commands of the selected tasks in dependency order.
    Exec {
        #[arg(value_name = "SELECTION", required = true)]
        selections: Vec<String>,
    },

    /// Print the roots and leafs of the graph.
    Roles,
}

/// Log level as exposed on the CLI and in the config file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
