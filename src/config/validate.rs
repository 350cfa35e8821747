// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunGraphError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RunGraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_markers(cfg)?;
    validate_shell(cfg)?;
    Ok(())
}

fn validate_markers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.tasks.markers.is_empty() {
        return Err(RunGraphError::ConfigError(
            "[tasks].markers must contain at least one marker".to_string(),
        ));
    }
    for (i, marker) in cfg.tasks.markers.iter().enumerate() {
        if marker.attribute.trim().is_empty() || marker.value.trim().is_empty() {
            return Err(RunGraphError::ConfigError(format!(
                "[tasks].markers[{i}] needs a non-empty attribute and value"
            )));
        }
    }
    Ok(())
}

fn validate_shell(cfg: &RawConfigFile) -> Result<()> {
    match cfg.exec.shell.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(RunGraphError::ConfigError(
            "[exec].shell must name a program".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskMarker;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.markers.iter().count(), 2);
        assert!(!cfg.shell.is_empty());
    }

    #[test]
    fn empty_marker_list_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.tasks.markers.clear();
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(RunGraphError::ConfigError(_))
        ));
    }

    #[test]
    fn blank_marker_value_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.tasks.markers = vec![TaskMarker::new("shape", " ")];
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn empty_shell_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.exec.shell = vec![];
        assert!(ConfigFile::try_from(raw).is_err());
    }
}
