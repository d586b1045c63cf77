//! Configuration for the phonebook service
//!
//! Settings come from defaults, then an optional TOML file, then environment
//! variables. The binary applies command line overrides last and validates.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_RANDOM_ID_UPPER_BOUND};
use crate::identity::IdentityPolicy;
use crate::storage::{PersonSchema, StorageType};
use crate::types::error::{PhonebookError, Result};
use crate::{log_info, log_warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Identity policy configuration
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Validation rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,

    /// Directory with the built browser client, served for unmatched paths
    pub static_dir: Option<PathBuf>,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: StorageType,

    /// Load the sample contacts at startup
    pub seed_sample_data: bool,

    /// Schema enforced by the document backend
    pub schema: PersonSchema,
}

/// Identity policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Which policy assigns identifiers
    pub policy: IdentityPolicy,

    /// Exclusive upper bound for the random policy
    pub random_upper_bound: u64,
}

/// Validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject creating a record whose name is already taken
    pub unique_names: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_HTTP_PORT)),
            static_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageType::Memory,
            seed_sample_data: false,
            schema: PersonSchema::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            policy: IdentityPolicy::Random,
            random_upper_bound: default_random_upper_bound(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unique_names: default_unique_names(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// Default value functions for serde
fn default_random_upper_bound() -> u64 { DEFAULT_RANDOM_ID_UPPER_BOUND }
fn default_unique_names() -> bool { true }

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PhonebookError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| PhonebookError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// `PORT` only replaces the port of the bind address; a later
    /// `PHONEBOOK_HTTP_ADDR` replaces the whole address.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| PhonebookError::config(format!("Invalid PORT: {}", e)))?;
            self.server.http_addr.set_port(port);
        }

        if let Some(addr) = lookup("PHONEBOOK_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| PhonebookError::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(dir) = lookup("PHONEBOOK_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(backend) = lookup("PHONEBOOK_STORAGE") {
            self.storage.backend = backend.parse()?;
        }

        if let Some(seed) = lookup("PHONEBOOK_SEED") {
            self.storage.seed_sample_data = parse_flag("PHONEBOOK_SEED", &seed)?;
        }

        if let Some(policy) = lookup("PHONEBOOK_ID_POLICY") {
            self.identity.policy = policy.parse()?;
        }

        if let Some(unique) = lookup("PHONEBOOK_UNIQUE_NAMES") {
            self.validation.unique_names = parse_flag("PHONEBOOK_UNIQUE_NAMES", &unique)?;
        }

        if let Some(level) = lookup("PHONEBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.identity.random_upper_bound == 0 {
            return Err(PhonebookError::config("Random id upper bound must be positive"));
        }

        let schema = &self.storage.schema;
        if schema.name_min_length == 0 || schema.number_min_length == 0 {
            return Err(PhonebookError::config("Schema minimum lengths must be at least 1"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(PhonebookError::config(format!("Invalid log level: {}", other))),
        }

        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PhonebookError::config(format!("Invalid {}: {}", key, other))),
    }
}

/// Load configuration from file or use defaults
pub fn load_config_or_default(path: Option<&str>) -> Config {
    match path {
        Some(path) => match Config::from_file(path) {
            Ok(config) => {
                log_info!("Loaded configuration from: {}", path);
                config
            }
            Err(e) => {
                log_warn!("Failed to load config from {}: {}. Using defaults.", path, e);
                Config::default()
            }
        },
        None => {
            log_info!("No config file specified, using defaults");
            Config::default()
        }
    }
}
