// src/config/mod.rs

//! Configuration loading and validation for rungraph.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Find and load a config file from disk (`loader.rs`).
//! - Validate it (`validate.rs`).
//! - Merge file values with CLI flags into [`Settings`].

pub mod loader;
pub mod model;
pub mod validate;

use std::path::PathBuf;

pub use loader::{find_config, load_and_validate, load_config, load_from_path};
pub use model::{ConfigFile, ExecSection, RawConfigFile, TasksSection};

use crate::cli::{CliArgs, LogLevel};
use crate::tasks::TaskMarkers;

/// Effective settings: CLI flags over config file values over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Graph path; `None` means "`graph.dot` if present, else the example".
    pub graph: Option<PathBuf>,
    pub output: PathBuf,
    pub log_level: Option<LogLevel>,
    pub markers: TaskMarkers,
    pub shell: Vec<String>,
}

impl Settings {
    pub fn new(args: &CliArgs, cfg: ConfigFile) -> Self {
        Self {
            graph: args.graph.clone().or(cfg.graph),
            output: args
                .output
                .clone()
                .or(cfg.output)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_level: args.log_level.or(cfg.log_level),
            markers: cfg.markers,
            shell: cfg.shell,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let cfg = ConfigFile::default();
        Self {
            graph: cfg.graph,
            output: PathBuf::from("."),
            log_level: cfg.log_level,
            markers: cfg.markers,
            shell: cfg.shell,
        }
    }
}
