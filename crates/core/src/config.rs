//! Configuration system for the cache simulator.
//!
//! This module defines the configuration supplied to the simulator. It provides:
//! 1. **Defaults:** Baseline cache parameters used when a key is absent.
//! 2. **Structures:** A flat `Config` naming total size, block size, and associativity.
//! 3. **Sources:** An INI-style `KEY: value` reader (`config.ini`) and JSON via serde.
//!
//! A configuration only carries raw values. Whether those values describe a real
//! cache is decided by [`Config::geometry`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::CacheGeometry;
use crate::common::constants::BYTES_PER_KB;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default total cache size (32 KiB).
    pub const CACHE_SIZE_KB: u64 = 32;

    /// Default cache line size in bytes (64 bytes).
    pub const BLOCK_SIZE_BYTES: u64 = 64;

    /// Default associativity (4-way).
    pub const ASSOCIATIVITY: u64 = 4;
}

/// INI key for the total cache size in kilobytes.
pub const KEY_CACHE_SIZE_KB: &str = "CACHE_SIZE_KB";
/// INI key for the block size in bytes.
pub const KEY_BLOCK_SIZE_BYTES: &str = "BLOCK_SIZE_BYTES";
/// INI key for the number of ways per set.
pub const KEY_ASSOCIATIVITY: &str = "ASSOCIATIVITY";

/// Root configuration structure.
///
/// # Examples
///
/// Reading the INI format:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::from_ini_str("CACHE_SIZE_KB: 1\nBLOCK_SIZE_BYTES: 64\nASSOCIATIVITY: 2\n")?;
/// assert_eq!(config.cache_size_bytes()?, 1024);
/// assert_eq!(config.geometry()?.num_sets(), 8);
/// # Ok::<(), cachesim_core::ConfigError>(())
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::from_json_str(r#"{ "cache_size_kb": 8, "associativity": 1 }"#)?;
/// assert_eq!(config.block_size_bytes, 64);
/// assert_eq!(config.geometry()?.num_sets(), 128);
/// # Ok::<(), cachesim_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Total cache size in kilobytes.
    #[serde(default = "Config::default_cache_size_kb")]
    pub cache_size_kb: u64,

    /// Block (line) size in bytes. Must be a power of two.
    #[serde(default = "Config::default_block_size_bytes")]
    pub block_size_bytes: u64,

    /// Number of ways per set.
    #[serde(default = "Config::default_associativity")]
    pub associativity: u64,
}

impl Config {
    /// Returns the default cache size in kilobytes.
    const fn default_cache_size_kb() -> u64 {
        defaults::CACHE_SIZE_KB
    }

    /// Returns the default block size in bytes.
    const fn default_block_size_bytes() -> u64 {
        defaults::BLOCK_SIZE_BYTES
    }

    /// Returns the default associativity.
    const fn default_associativity() -> u64 {
        defaults::ASSOCIATIVITY
    }

    /// Parses the INI-style `KEY: value` format.
    ///
    /// Each line is split at its first `:`; key and value are trimmed. Blank lines,
    /// lines without a separator, and lines starting with `#` or `;` are ignored.
    /// Unrecognised keys are logged and ignored; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if a recognised key's value is not an unsigned integer.
    pub fn from_ini_str(source: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let slot = match key {
                KEY_CACHE_SIZE_KB => &mut config.cache_size_kb,
                KEY_BLOCK_SIZE_BYTES => &mut config.block_size_bytes,
                KEY_ASSOCIATIVITY => &mut config.associativity,
                _ => {
                    tracing::warn!(key, "ignoring unknown configuration key");
                    continue;
                }
            };
            *slot = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_owned(),
                value: value.to_owned(),
            })?;
        }

        Ok(config)
    }

    /// Deserializes a JSON configuration object. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the document is not a valid configuration object.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a configuration file, choosing JSON for a `.json` extension and the INI
    /// format otherwise.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, or any parse error of the
    /// selected format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), is_json, "loading configuration");

        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_ini_str(&source)
        }
    }

    /// Total cache size in bytes (`cache_size_kb * 1024`).
    ///
    /// # Errors
    ///
    /// [`ConfigError::CacheSizeOverflow`] if the product does not fit in a `u64`.
    pub fn cache_size_bytes(&self) -> Result<u64, ConfigError> {
        self.cache_size_kb
            .checked_mul(BYTES_PER_KB)
            .ok_or(ConfigError::CacheSizeOverflow(self.cache_size_kb))
    }

    /// Derives the cache geometry described by this configuration.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised by [`CacheGeometry::new`], or
    /// [`ConfigError::CacheSizeOverflow`].
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(
            self.cache_size_bytes()?,
            self.block_size_bytes,
            self.associativity,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size_kb: defaults::CACHE_SIZE_KB,
            block_size_bytes: defaults::BLOCK_SIZE_BYTES,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}
