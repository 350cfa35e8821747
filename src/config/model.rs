// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::LogLevel;
use crate::tasks::{TaskMarker, TaskMarkers};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// graph = "deps.dot"
/// output = "induced"
/// log_level = "debug"
///
/// [tasks]
/// markers = [
///     { attribute = "shape", value = "box" },
///     { attribute = "kind", value = "task" },
/// ]
///
/// [exec]
/// shell = ["bash", "-c"]
/// ```
///
/// All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub graph: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub log_level: Option<LogLevel>,

    #[serde(default)]
    pub tasks: TasksSection,

    #[serde(default)]
    pub exec: ExecSection,
}

/// `[tasks]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TasksSection {
    /// Attribute/value pairs that mark a node as a task.
    #[serde(default = "default_markers")]
    pub markers: Vec<TaskMarker>,
}

fn default_markers() -> Vec<TaskMarker> {
    TaskMarkers::default().iter().cloned().collect()
}

impl Default for TasksSection {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecSection {
    /// Program and leading arguments; each command line is appended as the
    /// final argument.
    #[serde(default = "default_shell")]
    pub shell: Vec<String>,
}

pub fn default_shell() -> Vec<String> {
    if cfg!(windows) {
        vec!["cmd".to_string(), "/C".to_string()]
    } else {
        vec!["sh".to_string(), "-c".to_string()]
    }
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            shell: default_shell(),
        }
    }
}

/// Validated configuration.
///
/// Built from [`RawConfigFile`] through `TryFrom` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub graph: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub markers: TaskMarkers,
    pub shell: Vec<String>,
}

impl ConfigFile {
    /// Construct without validation. Callers must uphold the invariants
    /// checked by `TryFrom<RawConfigFile>`.
    pub fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            graph: raw.graph,
            output: raw.output,
            log_level: raw.log_level,
            markers: TaskMarkers::new(raw.tasks.markers),
            shell: raw.exec.shell,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}
