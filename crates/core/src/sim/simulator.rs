//! Simulator: owns the cache engine and its statistics side-by-side.
//!
//! Keeping both in one session value (instead of process-wide counters) lets several
//! independent simulations run in the same process.

use std::io::BufRead;

use crate::cache::{CacheSim, Outcome};
use crate::common::error::{ConfigError, TraceError};
use crate::config::Config;
use crate::stats::{Report, SimStats};
use crate::trace::{AccessRecord, TraceReader};

/// Top-level simulation session.
#[derive(Clone, Debug)]
pub struct Simulator {
    cache: CacheSim,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache shaped by `config`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised while deriving the geometry or allocating the
    /// engine. No access is simulated when this fails.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        Ok(Self::with_cache(CacheSim::new(geometry)?))
    }

    /// Wraps an already constructed engine.
    pub fn with_cache(cache: CacheSim) -> Self {
        Self {
            cache,
            stats: SimStats::default(),
        }
    }

    /// The cache engine.
    #[inline]
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Counters accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Runs one access through the cache and records its outcome.
    pub fn step(&mut self, record: AccessRecord) -> Outcome {
        let outcome = self.cache.access(record.addr);
        self.stats.record(record.access, outcome);
        outcome
    }

    /// Feeds every record to the cache, in order, until the iterator is exhausted.
    pub fn run<I>(&mut self, records: I) -> &SimStats
    where
        I: IntoIterator<Item = AccessRecord>,
    {
        for record in records {
            let _ = self.step(record);
        }
        &self.stats
    }

    /// Reads a textual trace and simulates every well-formed record.
    ///
    /// Malformed records are skipped and counted in `skipped_records`.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the reader fails. Records processed before the failure
    /// remain counted.
    pub fn run_trace<R: BufRead>(&mut self, reader: R) -> Result<&SimStats, TraceError> {
        tracing::debug!(
            num_sets = self.cache.geometry().num_sets(),
            associativity = self.cache.geometry().associativity(),
            "starting trace simulation"
        );

        let mut records = TraceReader::new(reader);
        let result: Result<(), TraceError> = records.by_ref().try_for_each(|record| {
            let _ = self.step(record?);
            Ok(())
        });
        self.stats.skipped_records += records.skipped();
        result.map(|()| &self.stats)
    }

    /// Summary of the run so far.
    pub fn report(&self) -> Report {
        self.stats.report()
    }

    /// Empties the cache and clears all counters, keeping the geometry.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.stats = SimStats::default();
    }
}
