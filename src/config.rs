//! Application configuration.
//!
//! Matrix dimensions and port numbers are fixed, shared out-of-band
//! configuration: both endpoints must agree on them, the protocol
//! never negotiates. Loaded from an optional TOML file, with the
//! `MATRIX_IP` environment variable overriding the stream target the
//! same way the deployment scripts expect.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};

/// Top-level configuration for both binaries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub matrix: MatrixConfig,
    pub network: NetworkConfig,
}

/// Matrix geometry and target frame rate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }
}

/// Transport tuning and addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Board IP address. `None` disables streaming entirely.
    pub target: Option<String>,
    pub frame_port: u16,
    pub event_port: u16,
    /// Packets sent back-to-back before pausing
    pub burst_size: usize,
    /// Pause between bursts, milliseconds
    pub burst_delay_ms: u64,
    /// Minimum interval between accepted presses of one button
    pub debounce_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            target: None,
            frame_port: DEFAULT_FRAME_PORT,
            event_port: DEFAULT_EVENT_PORT,
            burst_size: DEFAULT_BURST_SIZE,
            burst_delay_ms: DEFAULT_BURST_DELAY_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl NetworkConfig {
    pub fn burst_delay(&self) -> Duration {
        Duration::from_millis(self.burst_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration: file if present, defaults otherwise, then
    /// environment overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Ok(ip) = std::env::var("MATRIX_IP") {
            if !ip.is_empty() {
                config.network.target = Some(ip);
            }
        }
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Platform config file location (`config.toml` under the app's
    /// config directory), if one can be determined
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "led-matrix-streamer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
