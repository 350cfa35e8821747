// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// File name looked up in the working directory and in `$HOME`.
pub const CONFIG_FILE_NAME: &str = ".rungraph.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Locate the config file to use.
///
/// An explicit path always wins, even if it does not exist (loading then
/// fails). Otherwise `./.rungraph.toml`, then `$HOME/.rungraph.toml`.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_config_paths().into_iter().find(|p| p.is_file())
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(CONFIG_FILE_NAME));
    }
    paths
}

/// Discover and load the configuration, falling back to defaults when no
/// file is found.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match find_config(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_and_validate(&path)
        }
        None => {
            debug!("no config file found, using defaults");
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LogLevel;
    use crate::errors::RunGraphError;

    #[test]
    fn loads_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(
            &path,
            r#"
graph = "deps.dot"
output = "out"
log_level = "debug"

[tasks]
markers = [{ attribute = "kind", value = "Task" }]

[exec]
shell = ["bash", "-c"]
"#,
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.graph, Some(PathBuf::from("deps.dot")));
        assert_eq!(cfg.output, Some(PathBuf::from("out")));
        assert_eq!(cfg.log_level, Some(LogLevel::Debug));
        assert_eq!(cfg.markers.iter().count(), 1);
        assert_eq!(cfg.shell, vec!["bash", "-c"]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, RunGraphError::IoError(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(&path, "grpah = \"typo.dot\"\n").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(RunGraphError::TomlError(_))
        ));
    }
}
