//! Shell configuration, applied once at startup

use log::info;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "ACTIVITY_DASHBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Title bar styling shared by every page the shell hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// `reset` leaves the terminal background showing through
    pub title_bar_bg: Color,
    pub title_fg: Color,
    pub back_tint: Color,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            title_bar_bg: Color::Reset,
            title_fg: Color::White,
            back_tint: Color::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub username: String,
    pub chrome: ChromeConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            username: "Zia".into(),
            chrome: ChromeConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Load from `$ACTIVITY_DASHBOARD_CONFIG` when set, defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("Loading shell config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
