//! Persisted display settings.
//!
//! The daemon and the `mode` subcommand share one small JSON file holding
//! the preferences that survive restarts: the display mode name and the
//! rotation cadence. Environment variables always win over this file.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Settings file {path} holds invalid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub mode: String,
    pub rotation_interval_secs: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            mode: "single".to_string(),
            rotation_interval_secs: 2.0,
        }
    }
}

impl DisplaySettings {
    /// Reads the settings file. A missing file is not an error and yields
    /// the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| SettingsError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Like [`load`](Self::load), but degrades to defaults with a warning
    /// when the file is unreadable or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "Ignoring persisted display settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.to_owned(),
                source,
            })?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_owned(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

/// Configuration directory: `$GLYPHBAR_CONFIG_DIR`, else
/// `$XDG_CONFIG_HOME/glyphbar`, else `~/.config/glyphbar`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = env::var_os("GLYPHBAR_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("glyphbar");
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("glyphbar"),
        None => PathBuf::from(".glyphbar"),
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}
