//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `notigate.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. Routing configuration is validated at load;
//! a malformed routing table is the one fatal error class of the daemon.

use std::collections::HashMap;

use serde::Deserialize;

use notigate_domain::error::ValidationError;
use notigate_domain::id::ServiceId;
use notigate_domain::routing::{RoutingConfig, RoutingMode};
use notigate_domain::smart::SmartParams;
use notigate_domain::target::Target;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Target selection settings.
    pub routing: RoutingSection,
    /// Outbound delivery settings.
    pub dispatch: DispatchConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Which engine runs and with what inputs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoutingSection {
    /// Selection engine flag.
    pub mode: ModeFlag,
    /// Candidate targets (conditional mode).
    pub targets: Vec<Target>,
    /// Order in which targets are tried (conditional mode).
    pub priority: Vec<ServiceId>,
    /// Service used when nothing matches (conditional mode).
    pub fallback: Option<ServiceId>,
    /// Smart-selection parameters (smart mode).
    pub smart: SmartParams,
}

/// The routing mode flag as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeFlag {
    #[default]
    Conditional,
    Smart,
}

/// Outbound delivery endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Webhook URL per downstream service.
    pub webhooks: HashMap<ServiceId, String>,
}

impl RoutingSection {
    /// Assemble the immutable routing mode the engines consume.
    #[must_use]
    pub fn mode(&self) -> RoutingMode {
        match self.mode {
            ModeFlag::Conditional => RoutingMode::Conditional(RoutingConfig {
                targets: self.targets.clone(),
                priority: self.priority.clone(),
                fallback: self.fallback.clone(),
            }),
            ModeFlag::Smart => RoutingMode::Smart(self.smart.clone()),
        }
    }
}

impl Config {
    /// Load configuration from `notigate.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting routing configuration violates a domain invariant.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("notigate.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NOTIGATE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("NOTIGATE_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("NOTIGATE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("NOTIGATE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.routing.mode().validate()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "notigated=info,notigate=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// Routing configuration violates a domain invariant.
    #[error("invalid routing configuration")]
    Routing(#[from] ValidationError),
}
