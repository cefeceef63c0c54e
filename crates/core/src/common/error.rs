//! Error definitions.
//!
//! Two families of failure exist in the simulator:
//! 1. **Configuration errors:** Fatal. Raised before any access is simulated when the
//!    configured geometry cannot describe a real cache.
//! 2. **Trace errors:** A malformed record is recovered locally by skipping it; only an
//!    underlying I/O failure aborts the run.
//!
//! The engine's `access` operation itself cannot fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a configuration or deriving a cache geometry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The total cache size is zero.
    #[error("cache size must be greater than zero")]
    ZeroCacheSize,

    /// The block (line) size is zero.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,

    /// The block size cannot be split into whole offset bits.
    #[error("block size {0} bytes is not a power of two")]
    BlockSizeNotPowerOfTwo(u64),

    /// Associativity of zero describes a cache with no ways.
    #[error("associativity cannot be zero")]
    InvalidAssociativity,

    /// The cache is too small for even one set of `associativity` blocks.
    #[error(
        "number of sets is zero: {cache_size_bytes} bytes cannot hold {associativity} blocks of {block_size_bytes} bytes"
    )]
    DegenerateGeometry {
        /// Configured total size in bytes.
        cache_size_bytes: u64,
        /// Configured block size in bytes.
        block_size_bytes: u64,
        /// Configured number of ways per set.
        associativity: u64,
    },

    /// The derived set count cannot be indexed by a whole number of address bits.
    #[error("number of sets {0} is not a power of two")]
    SetCountNotPowerOfTwo(u64),

    /// The cache size does not divide evenly into sets of blocks.
    #[error(
        "{cache_size_bytes} bytes is not a whole number of {associativity}-way sets of {block_size_bytes}-byte blocks"
    )]
    InexactGeometry {
        /// Configured total size in bytes.
        cache_size_bytes: u64,
        /// Configured block size in bytes.
        block_size_bytes: u64,
        /// Configured number of ways per set.
        associativity: u64,
    },

    /// `CACHE_SIZE_KB * 1024` does not fit in 64 bits.
    #[error("cache size of {0} KB overflows a 64-bit byte count")]
    CacheSizeOverflow(u64),

    /// The way array for this geometry cannot be allocated on this host.
    #[error("cache of {num_blocks} blocks is too large to allocate")]
    CacheTooLarge {
        /// Total number of blocks (ways across all sets) requested.
        num_blocks: u64,
    },

    /// A configuration value could not be parsed as a non-negative integer.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Raw value as it appeared in the source.
        value: String,
    },

    /// The configuration file could not be read.
    #[error("could not open config file {}: {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON configuration was not well formed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A record was missing its direction or address, or one of them did not parse.
    #[error("malformed trace record on line {line}: {reason}")]
    Malformed {
        /// 1-based line number within the trace.
        line: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// The trace source itself failed.
    #[error("trace I/O error: {0}")]
    Io(#[from] io::Error),
}
