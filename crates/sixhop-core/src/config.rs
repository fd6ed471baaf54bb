//! sixhop configuration module.
//!
//! Provides configuration file support via `sixhop.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (API)
//! 2. Environment variables (`SIXHOP_*`)
//! 3. Configuration file (`sixhop.toml`)
//! 4. Default values
//!
//! The engine itself only consumes plain values; loading and merging
//! happen at the process boundary (server binary, tests).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Graph configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of adjacency partitions.
    pub num_shards: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { num_shards: 4 }
    }
}

/// Path-cache configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// LRU capacity for path results.
    pub max_size: usize,
    /// Default TTL of path entries, in seconds.
    pub path_ttl_secs: u64,
    /// Minimum spacing of TTL sweeps, in seconds.
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 50_000,
            path_ttl_secs: 1800,
            cleanup_interval_secs: 300,
        }
    }
}

impl CacheConfig {
    /// Default TTL as a [`Duration`].
    #[must_use]
    pub fn path_ttl(&self) -> Duration {
        Duration::from_secs(self.path_ttl_secs)
    }

    /// Sweep spacing as a [`Duration`].
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// Search configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hard cap on returned path length (degrees of separation).
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 6 }
    }
}

/// Server configuration section (consumed by the REST collaborator).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Enable permissive CORS.
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_enabled: true,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main sixhop configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Graph configuration.
    pub graph: GraphConfig,
    /// Path-cache configuration.
    pub cache: CacheConfig,
    /// Search configuration.
    pub search: SearchConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Loads configuration from default sources (`sixhop.toml` next to
    /// the working directory, then `SIXHOP_*` environment variables).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from_path("sixhop.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SIXHOP_").split("_").lowercase(false));

        figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.graph.num_shards == 0 {
            return Err(Error::Config(
                "graph.num_shards must be at least 1".to_string(),
            ));
        }

        if self.cache.max_size == 0 {
            return Err(Error::Config(
                "cache.max_size must be at least 1".to_string(),
            ));
        }

        if !(1..=12).contains(&self.search.max_depth) {
            return Err(Error::Config(format!(
                "search.max_depth {} is out of range [1, 12]",
                self.search.max_depth
            )));
        }

        if self.server.port < 1024 {
            return Err(Error::Config(format!(
                "server.port {} must be >= 1024",
                self.server.port
            )));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(Error::Config(format!(
                "logging.level '{}' is invalid, expected one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
