//! Trace-driven set-associative cache simulator library.
//!
//! This crate models how a single cache of configurable geometry responds to a
//! sequence of memory accesses:
//! 1. **Cache:** Geometry derivation, address decomposition, lookup, and LRU replacement.
//! 2. **Config:** INI and JSON configuration sources with defaults.
//! 3. **Trace:** Access-record parsing and synthetic trace generation.
//! 4. **Simulation:** A session that drives the cache and collects statistics.
//!
//! # Example
//!
//! ```
//! use cachesim_core::{Config, Simulator};
//! use cachesim_core::trace::AccessRecord;
//!
//! let config = Config { cache_size_kb: 1, block_size_bytes: 64, associativity: 2 };
//! let mut sim = Simulator::new(&config)?;
//! let stats = sim.run([AccessRecord::read(0x40), AccessRecord::read(0x44)]);
//! assert_eq!((stats.hits, stats.misses), (1, 1));
//! # Ok::<(), cachesim_core::ConfigError>(())
//! ```

/// Cache engine and geometry.
pub mod cache;
/// Common types and constants (address width, access types, errors).
pub mod common;
/// Simulator configuration (defaults, INI and JSON sources).
pub mod config;
/// Simulation session driving the cache.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Access trace parsing and generation.
pub mod trace;

/// Cache engine; construct with `CacheSim::new(geometry)?`.
pub use crate::cache::{CacheGeometry, CacheSim, MissKind, Outcome};
/// Configuration and trace error types.
pub use crate::common::{AccessType, ConfigError, TraceError};
/// Root configuration type; use `Config::default()`, `Config::load`, or a literal.
pub use crate::config::Config;
/// Simulation session; construct with `Simulator::new(&config)`.
pub use crate::sim::Simulator;
/// Aggregate counters and the printable report.
pub use crate::stats::{Report, SimStats};
