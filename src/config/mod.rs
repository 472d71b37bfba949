//! Application configuration
//!
//! A TOML file merged over built-in defaults, in sections `[editor]`,
//! `[server]`, and `[store]`. Missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::EditorConfig;
use crate::util::paths::{config_path, snapshots_dir};
use crate::web::ServerConfig;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("time_scale must be positive, got {0}")]
    InvalidTimeScale(f64),
    #[error("history_capacity must be positive")]
    InvalidHistoryCapacity,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Editor deployment settings (namespace, scale, required columns).
    pub editor: EditorConfig,
    /// Snapshot server bind settings.
    pub server: ServerConfig,
    /// Directory backing the flat-file snapshot store.
    pub store_dir: PathBuf,
    /// Snapshot server URL for the remote-store client, if any.
    pub remote_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            server: ServerConfig::default(),
            store_dir: snapshots_dir(),
            remote_url: None,
        }
    }
}

/// TOML representation of the `[editor]` section
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlEditorConfig {
    name: Option<String>,
    time_scale: Option<f64>,
    required_columns: Option<Vec<String>>,
    history_capacity: Option<usize>,
    default_snapshot: Option<String>,
    example_snapshot: Option<String>,
}

/// TOML representation of the `[server]` section
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

/// TOML representation of the `[store]` section
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlStoreConfig {
    dir: Option<PathBuf>,
    remote_url: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    editor: Option<TomlEditorConfig>,
    server: Option<TomlServerConfig>,
    store: Option<TomlStoreConfig>,
}

impl Config {
    /// Load from the default location (~/.timeliner/config.toml);
    /// a missing file yields the defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse TOML contents merged over the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Self::default();

        if let Some(editor) = toml_config.editor {
            if let Some(name) = editor.name {
                config.editor.name = name;
            }
            if let Some(time_scale) = editor.time_scale {
                config.editor.time_scale = time_scale;
            }
            if let Some(required_columns) = editor.required_columns {
                config.editor.required_columns = required_columns;
            }
            if let Some(history_capacity) = editor.history_capacity {
                config.editor.history_capacity = history_capacity;
            }
            if let Some(default_snapshot) = editor.default_snapshot {
                config.editor.default_snapshot = default_snapshot;
            }
            if let Some(example_snapshot) = editor.example_snapshot {
                config.editor.example_snapshot = example_snapshot;
            }
        }

        if let Some(server) = toml_config.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }

        if let Some(store) = toml_config.store {
            if let Some(dir) = store.dir {
                config.store_dir = dir;
            }
            config.remote_url = store.remote_url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.editor.time_scale > 0.0) {
            return Err(ConfigError::InvalidTimeScale(self.editor.time_scale));
        }
        if self.editor.history_capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.editor.time_scale, 1.0);
        assert_eq!(config.editor.history_capacity, 5);
        assert_eq!(config.server.port, 3000);
        assert!(config.remote_url.is_none());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            [editor]
            name = "process"
            time_scale = 2.0
            required_columns = ["Event1", "Event2"]
            history_capacity = 8

            [server]
            host = "0.0.0.0"
            port = 8080

            [store]
            dir = "/tmp/snapshots"
            remote_url = "http://localhost:8080/"
            "#,
        )
        .unwrap();

        assert_eq!(config.editor.name, "process");
        assert_eq!(config.editor.time_scale, 2.0);
        assert_eq!(config.editor.required_columns.len(), 2);
        assert_eq!(config.editor.history_capacity, 8);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store_dir, PathBuf::from("/tmp/snapshots"));
        assert_eq!(config.remote_url.as_deref(), Some("http://localhost:8080/"));
    }

    #[test]
    fn test_zero_time_scale_rejected() {
        let err = Config::from_toml("[editor]\ntime_scale = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeScale(_)));
    }

    #[test]
    fn test_negative_time_scale_rejected() {
        let err = Config::from_toml("[editor]\ntime_scale = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeScale(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_toml("[editor]\nhistory_capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHistoryCapacity));
    }

    #[test]
    fn test_example_config_parses() {
        Config::from_toml(EXAMPLE_CONFIG).unwrap();
    }
}
