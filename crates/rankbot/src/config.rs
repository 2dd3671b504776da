//! Tunables loaded from `rankbot.toml`.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`include_str!` of the workspace `rankbot.toml`)
//! 2. `~/.config/rankbot/rankbot.toml`
//! 3. `./rankbot.toml`
//! 4. A file named on the command line, which must exist

use config::{Config, File, FileFormat};
use rankbot_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../rankbot.toml");

/// Chat connection tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrcSettings {
    /// `host:port` of the chat server
    pub address: String,
    /// Longest accepted inbound line in bytes
    pub max_frame_len: usize,
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Command definitions
    pub commands: PathBuf,
    /// Persisted identity cache
    pub players: PathBuf,
    /// Champion id to name table
    pub champions: PathBuf,
}

/// Outbound HTTP tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout
    pub timeout_secs: u64,
}

/// App credential tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSettings {
    /// Seconds between token refreshes
    pub refresh_interval_secs: u64,
}

/// All tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Chat connection
    pub irc: IrcSettings,
    /// Data files
    pub paths: PathSettings,
    /// Outbound HTTP
    pub http: HttpSettings,
    /// App credential
    pub credentials: CredentialSettings,
}

impl BotSettings {
    /// Load with precedence: explicit file > current dir > home dir > bundled
    /// defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading tunables with precedence: explicit > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rankbot/rankbot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("rankbot").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        settings.validate()
    }

    /// The bundled defaults alone.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Bundled defaults overlaid with TOML text.
    pub fn from_toml(overrides: &str) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        settings.validate()
    }

    /// Reject zero sizes and periods: a zero frame limit drops every line, a
    /// zero timeout fails every request, and a zero refresh period cannot
    /// drive a timer.
    fn validate(self) -> Result<Self, ConfigError> {
        let zeroed: Vec<&str> = [
            ("irc.max_frame_len", self.irc.max_frame_len == 0),
            ("http.timeout_secs", self.http.timeout_secs == 0),
            (
                "credentials.refresh_interval_secs",
                self.credentials.refresh_interval_secs == 0,
            ),
        ]
        .into_iter()
        .filter_map(|(key, zero)| zero.then_some(key))
        .collect();

        if zeroed.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::new(format!(
                "Configuration values must be greater than zero: {}",
                zeroed.join(", ")
            )))
        }
    }

    /// Per-request HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Credential refresh period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.credentials.refresh_interval_secs)
    }
}
