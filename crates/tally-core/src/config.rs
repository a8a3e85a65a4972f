//! Dashboard configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (`--config`), which must exist
//! 2. Override in data dir (~/.local/share/tally/config/tally.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file fall back to the compiled defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::ProjectionOptions;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct TallyConfig {
    /// Default transaction dataset
    pub data_path: PathBuf,
    pub projection: ProjectionOptions,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origins: vec![],
        }
    }
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("transactions.json"),
            projection: ProjectionOptions::default(),
            server: ServerSettings::default(),
        }
    }
}

impl TallyConfig {
    /// Load config, preferring an explicit path, then the data-dir override
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::NotFound(format!("Config file {}", path.display())));
            }
            return Self::from_file(path);
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::from_file(&path);
        }

        Self::parse(DEFAULT_CONFIG)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(data) = raw.data {
            if let Some(path) = data.path {
                config.data_path = path;
            }
        }

        if let Some(projection) = raw.projection {
            if let Some(days) = projection.days {
                config.projection.days = days;
            }
            if let Some(window) = projection.window_days {
                config.projection.window_days = window;
            }
            if let Some(balance) = projection.starting_balance {
                config.projection.starting_balance = balance;
            }
            config.projection.validate()?;
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(origins) = server.allowed_origins {
                config.server.allowed_origins = origins;
            }
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    data: Option<RawData>,
    projection: Option<RawProjection>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    days: Option<u32>,
    window_days: Option<u32>,
    starting_balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}
