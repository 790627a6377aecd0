use ledcube::{Color, DEFAULT_MAX_BRIGHTNESS, DEFAULT_SIZE, NETWORK_REFRESH_SECS, STREAMING_PORT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Largest payload a single UDP datagram can carry over IPv4.
pub const MAX_DATAGRAM: usize = 65_507;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for the frame listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host the UDP socket binds to.
    pub bind_host: String,
    /// Port frames are received on.
    pub port: u16,
    /// Cube edge length; frames must be exactly `size³` bytes.
    pub size: u32,
    /// Brightness cap handed to the cube.
    pub max_brightness: u8,
    /// Color shown before the first frame arrives.
    pub idle_color: Color,
    /// Seconds between metrics log lines.
    pub metrics_interval_secs: u64,
    /// Seconds between network info refreshes.
    pub network_refresh_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: STREAMING_PORT,
            size: DEFAULT_SIZE,
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            idle_color: Color::default(),
            metrics_interval_secs: 30,
            network_refresh_secs: NETWORK_REFRESH_SECS,
        }
    }
}

impl ServerConfig {
    /// Load a TOML file. Keys left out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the values can drive a cube over UDP.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.size >= 1, "cube size must be >= 1");
        anyhow::ensure!(
            self.frame_len() <= MAX_DATAGRAM,
            "a {size}³ frame is {len} bytes, more than one datagram ({MAX_DATAGRAM})",
            size = self.size,
            len = self.frame_len(),
        );
        anyhow::ensure!(self.metrics_interval_secs >= 1, "metrics interval must be >= 1s");
        Ok(())
    }

    /// Bytes in one frame (`size³`), saturating at `usize::MAX`.
    pub fn frame_len(&self) -> usize {
        let s = self.size as usize;
        s.saturating_mul(s).saturating_mul(s)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs(self.metrics_interval_secs)
    }

    pub fn network_refresh(&self) -> Duration {
        Duration::from_secs(self.network_refresh_secs)
    }
}
