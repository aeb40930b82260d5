//! # Configuration
//!
//! TOML configuration for the pgquest server. Every section and field has a
//! default, so a partial file (or an empty one) loads.
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:5432"
//! server_version = "16.8"
//! idle_timeout_secs = 0
//! max_frame_len = 1048576
//!
//! [game]
//! world = "forest"
//! banner_on_connect = true
//!
//! [logging]
//! level = "info"
//! file = "pgquest.log"
//! ```
//!
//! ```rust,no_run
//! use pgquest::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!     println!("listening on {}", config.server.listen_addr);
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::pgwire::DEFAULT_MAX_FRAME_LEN;
use crate::worlds::WorldKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Reported in ParameterStatus and the `SELECT version()` probe.
    pub server_version: String,
    /// Close sessions idle this long. 0 disables the timeout.
    pub idle_timeout_secs: u64,
    pub max_frame_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5432".to_string(),
            server_version: "16.8".to_string(),
            idle_timeout_secs: 0,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

impl ServerConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        match self.idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Which world each new connection plays.
    pub world: WorldKind,
    /// Send the command listing right after the handshake.
    pub banner_on_connect: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldKind::Forest,
            banner_on_connect: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("pgquest.log".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid listen_addr '{}': {}", self.server.listen_addr, e))?;
        if self.server.max_frame_len < 1024 {
            return Err(anyhow!(
                "max_frame_len must be at least 1024 bytes (got {})",
                self.server.max_frame_len
            ));
        }
        if self.server.server_version.trim().is_empty() {
            return Err(anyhow!("server_version must not be empty"));
        }
        Ok(())
    }
}
