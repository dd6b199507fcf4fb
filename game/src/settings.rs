use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const SETTINGS_PATH_ENV: &str = "CRIMSON_SETTINGS_PATH";
pub const MAX_WINDOW_SCALE: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoSettings {
    /// Initial window size as a multiple of the canvas.
    pub window_scale: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self { window_scale: 1 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputSettings {
    /// When set, auto-repeated Escape presses no longer re-toggle pause.
    pub ignore_pause_key_repeat: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub video: VideoSettings,
    #[serde(default)]
    pub input: InputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            video: VideoSettings::default(),
            input: InputSettings::default(),
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.video.window_scale = self.video.window_scale.clamp(1, MAX_WINDOW_SCALE);
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where settings are read from. Settings are never written back.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::at(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("crimson").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means defaults; anything else that goes wrong is an error.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file; using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let settings = serde_json::from_slice::<Settings>(&bytes)
            .map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?
            .sanitized();
        info!(path = %self.path.display(), "loaded settings");
        Ok(settings)
    }
}
