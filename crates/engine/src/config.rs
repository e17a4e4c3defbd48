//! Store configuration
//!
//! A [`StoreConfig`] can be written as TOML (see [`StoreConfig::default_toml`])
//! and loaded with [`StoreConfig::from_file`]. [`OpenOptions`] layers
//! per-open overrides on top of it.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessera_core::limits::DEFAULT_MAX_VALUE_SIZE;
use tessera_core::Error;
use tessera_durability::error::io_status;
use tessera_durability::DurabilityMode;
use thiserror::Error as ThisError;
use tracing::warn;

/// Default size of the chunks a fetch delivers.
pub const DEFAULT_FETCH_CHUNK_SIZE: usize = 4096;

/// Configuration errors
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The TOML did not parse into a config
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unrecognised durability mode
    #[error("invalid durability mode '{0}', expected \"standard\" or \"always\"")]
    InvalidDurability(String),

    /// `fetch_chunk_size` of zero
    #[error("fetch_chunk_size must be greater than zero")]
    ZeroChunkSize,
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match &e {
            ConfigError::Read { source, .. } => Error::from_status(io_status(source)),
            _ => {
                warn!(target: "tessera::store", error = %e, "Invalid configuration");
                Error::Unknown
            }
        }
    }
}

/// Store configuration.
///
/// # Example
///
/// ```toml
/// durability = "always"
/// fetch_chunk_size = 65536
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Durability mode: `"standard"` or `"always"`.
    pub durability: String,
    /// Largest chunk handed to a fetch sink, in bytes.
    pub fetch_chunk_size: usize,
    /// Largest value accepted by a store or append, in bytes.
    pub max_value_size: u64,
    /// Open read-only.
    pub read_only: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            durability: "standard".to_string(),
            fetch_chunk_size: DEFAULT_FETCH_CHUNK_SIZE,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            read_only: false,
        }
    }
}

impl StoreConfig {
    /// Parse the durability string into a [`DurabilityMode`].
    pub fn durability_mode(&self) -> Result<DurabilityMode, ConfigError> {
        match self.durability.as_str() {
            "standard" => Ok(DurabilityMode::standard_default()),
            "always" => Ok(DurabilityMode::Always),
            other => Err(ConfigError::InvalidDurability(other.to_string())),
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durability_mode()?;
        if self.fetch_chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }

    /// The default config file content, with comments.
    pub fn default_toml() -> &'static str {
        r#"# Tessera store configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = fsync every 64 commits and on close
#   "always"   = fsync every commit, zero data loss
durability = "standard"

# Largest chunk handed to a fetch consumer, in bytes
fetch_chunk_size = 4096

# Largest value a store or append may produce, in bytes (64 MiB)
max_value_size = 67108864

# Open without write access
read_only = false
"#
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Controls whether the store allows writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Every write fails with `ReadOnly`.
    ReadOnly,
}

/// Options for opening a store.
///
/// Any field set to `Some` overrides the base configuration, which is
/// [`StoreConfig::default`] unless a config file is given.
///
/// ```
/// use tessera_engine::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new()
///     .access_mode(AccessMode::ReadOnly)
///     .durability("always");
/// let config = opts.resolve().unwrap();
/// assert!(config.read_only);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Access mode. `ReadOnly` wins over the config file.
    pub access_mode: AccessMode,
    /// Override durability mode: `"standard"` or `"always"`.
    pub durability: Option<String>,
    /// Override the fetch chunk size.
    pub fetch_chunk_size: Option<usize>,
    /// Override the value size limit.
    pub max_value_size: Option<u64>,
    /// Load the base configuration from this TOML file.
    pub config_file: Option<PathBuf>,
}

impl OpenOptions {
    /// Create options with default settings (read-write).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the durability mode (`"standard"` or `"always"`).
    pub fn durability(mut self, mode: &str) -> Self {
        self.durability = Some(mode.to_string());
        self
    }

    /// Set the fetch chunk size.
    pub fn fetch_chunk_size(mut self, size: usize) -> Self {
        self.fetch_chunk_size = Some(size);
        self
    }

    /// Set the value size limit.
    pub fn max_value_size(mut self, size: u64) -> Self {
        self.max_value_size = Some(size);
        self
    }

    /// Load the base configuration from a file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Produce the effective, validated configuration.
    pub fn resolve(&self) -> Result<StoreConfig, ConfigError> {
        let base = match &self.config_file {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };
        self.apply(base)
    }

    /// Apply these overrides to `base` and validate the result.
    pub fn apply(&self, mut base: StoreConfig) -> Result<StoreConfig, ConfigError> {
        if let Some(durability) = &self.durability {
            base.durability = durability.clone();
        }
        if let Some(size) = self.fetch_chunk_size {
            base.fetch_chunk_size = size;
        }
        if let Some(size) = self.max_value_size {
            base.max_value_size = size;
        }
        if self.access_mode == AccessMode::ReadOnly {
            base.read_only = true;
        }
        base.validate()?;
        Ok(base)
    }
}
