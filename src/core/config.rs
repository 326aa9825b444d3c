//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults, then overridden by environment
//! variables (a `.env` file is honoured through `dotenvy`).

use super::transport::TransportConfig;
use crate::domains::genius::OutputFormat;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default origin of the Genius REST API.
pub const DEFAULT_GENIUS_API_BASE: &str = "https://api.genius.com";

/// Default per-request timeout, in seconds.
pub const DEFAULT_GENIUS_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Genius API access.
    pub genius: GeniusConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Genius API access configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeniusConfig {
    /// Bearer token for the Genius API. Calls fail without it.
    pub access_token: Option<String>,

    /// API origin, without trailing slash.
    pub api_base: String,

    /// Timeout applied to every outbound request.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeniusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeniusConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base: DEFAULT_GENIUS_API_BASE.to_string(),
            timeout_secs: DEFAULT_GENIUS_TIMEOUT_SECS,
        }
    }
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Rendering of resource contents.
    pub format: OutputFormat,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Whether prompts are advertised at all.
    pub enabled: bool,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS` without loading the
    /// rest of the configuration.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Some(level) = env_var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(timestamps) = env_var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }
        logging
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "genius".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            genius: GeniusConfig::default(),
            resources: ResourcesConfig::default(),
            prompts: PromptsConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Read a variable, treating blank values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `MCP_LOG_TIMESTAMPS`, `GENIUS_API_KEY` (or `MCP_GENIUS_API_KEY`),
    /// `GENIUS_API_BASE`, `GENIUS_TIMEOUT_SECS`, `MCP_RESOURCE_FORMAT`,
    /// `MCP_PROMPTS_ENABLED`, plus the transport variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        config.genius.access_token =
            env_var("GENIUS_API_KEY").or_else(|| env_var("MCP_GENIUS_API_KEY"));

        if let Some(api_base) = env_var("GENIUS_API_BASE") {
            config.genius.api_base = api_base;
        }

        if let Some(timeout) = env_var("GENIUS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.genius.timeout_secs = secs,
                _ => warn!("Ignoring invalid GENIUS_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Some(format) = env_var("MCP_RESOURCE_FORMAT") {
            match OutputFormat::parse(&format) {
                Some(format) => config.resources.format = format,
                None => warn!("Ignoring unknown MCP_RESOURCE_FORMAT: {}", format),
            }
        }

        if let Some(enabled) = env_var("MCP_PROMPTS_ENABLED") {
            config.prompts.enabled = enabled.parse().unwrap_or(true);
        }

        config.transport = TransportConfig::from_env();

        config
    }
}
