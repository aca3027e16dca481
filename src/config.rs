//! Persisted annotation-task configuration.
//!
//! Stores the task's model type, the resolved annotation directory, and the
//! most recently used label, as a small versioned JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::TaskKind;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Task configuration that survives across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Model type of the task (drives tool gating and shape reconstruction)
    pub task: TaskKind,

    /// Directory holding the annotation sidecar files, once chosen
    #[serde(default)]
    pub annotation_dir: Option<PathBuf>,

    /// Most recently assigned label, seeding the label prompt
    #[serde(default)]
    pub last_label: Option<String>,
}

impl CanvasConfig {
    /// Create a new configuration for a task type.
    pub fn new(task: TaskKind) -> Self {
        Self {
            version: CONFIG_VERSION,
            task,
            annotation_dir: None,
            last_label: None,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON, rejecting files written by a
    /// newer version of the format.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    /// Default config file path under the user configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("labelcanvas").join("config.json"))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config").join("labelcanvas").join("config.json")
            })
        }
    }

    /// Try to load configuration from a path.
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("no config file found at {:?}", path);
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = self.to_json().map_err(ConfigError::ParseError)?;
        std::fs::write(path, json)?;
        log::info!("saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(TaskKind::default())
    }
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut config = CanvasConfig::new(TaskKind::Obb);
        config.annotation_dir = Some(PathBuf::from("/data/labels"));
        config.last_label = Some("car".into());

        let json = config.to_json().unwrap();
        let back = CanvasConfig::from_json(&json).unwrap();
        assert_eq!(back.task, TaskKind::Obb);
        assert_eq!(back.annotation_dir, Some(PathBuf::from("/data/labels")));
        assert_eq!(back.last_label.as_deref(), Some("car"));
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = format!(
            "{{\"version\": {}, \"task\": \"detect\"}}",
            CONFIG_VERSION + 1
        );
        assert!(matches!(
            CanvasConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = "{\"version\": 1, \"task\": \"segment\"}";
        let config = CanvasConfig::from_json(json).unwrap();
        assert_eq!(config.task, TaskKind::Segment);
        assert!(config.annotation_dir.is_none());
        assert!(config.last_label.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CanvasConfig::new(TaskKind::Pose);
        config.save_to(&path).unwrap();

        let loaded = CanvasConfig::load_from(&path).unwrap();
        assert_eq!(loaded.task, TaskKind::Pose);
        assert!(CanvasConfig::load_from(&dir.path().join("absent.json")).is_none());
    }
}
