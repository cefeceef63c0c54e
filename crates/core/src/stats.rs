//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate outcome of a simulation run. It provides:
//! 1. **Counters:** Hits and misses, with misses split into cold and capacity.
//! 2. **Access mix:** Read and write counts, plus trace records skipped as malformed.
//! 3. **Report:** A summary view rendered as text or serialized to JSON.

use std::fmt;

use serde::Serialize;

use crate::cache::{MissKind, Outcome};
use crate::common::data::AccessType;

/// Aggregate counters for one simulation.
///
/// Invariants: `hits + misses` is the number of accesses processed,
/// `cold_misses + capacity_misses == misses`, and `reads + writes == hits + misses`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to install their block.
    pub misses: u64,
    /// Misses satisfied by an empty way.
    pub cold_misses: u64,
    /// Misses that evicted a valid way.
    pub capacity_misses: u64,
    /// Read accesses processed.
    pub reads: u64,
    /// Write accesses processed.
    pub writes: u64,
    /// Malformed trace records skipped before reaching the cache.
    pub skipped_records: u64,
}

impl SimStats {
    /// Records the outcome of one access.
    pub const fn record(&mut self, access: AccessType, outcome: Outcome) {
        match access {
            AccessType::Read => self.reads += 1,
            AccessType::Write => self.writes += 1,
        }
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss(kind) => {
                self.misses += 1;
                match kind {
                    MissKind::Cold => self.cold_misses += 1,
                    MissKind::Capacity => self.capacity_misses += 1,
                }
            }
        }
    }

    /// Total accesses processed (`hits + misses`).
    #[inline]
    pub const fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`. Zero when nothing was processed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, in `[0, 1]`. Zero when nothing was processed.
    pub fn miss_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Builds the summary handed to the report sink.
    pub fn report(&self) -> Report {
        Report {
            total_accesses: self.total_accesses(),
            hits: self.hits,
            misses: self.misses,
            cold_misses: self.cold_misses,
            capacity_misses: self.capacity_misses,
            hit_rate: self.hit_rate(),
        }
    }
}

/// Final summary of a simulation.
///
/// `hit_rate` is a fraction; the text rendering shows it as a percentage with four
/// decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Accesses processed.
    pub total_accesses: u64,
    /// Hits.
    pub hits: u64,
    /// Misses (cold + capacity).
    pub misses: u64,
    /// Misses that filled an empty way.
    pub cold_misses: u64,
    /// Misses that evicted a valid way.
    pub capacity_misses: u64,
    /// `hits / total_accesses`, or 0.0 for an empty run.
    pub hit_rate: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Results ---")?;
        writeln!(f, "Total Accesses: {}", self.total_accesses)?;
        writeln!(f, "Hits: {}", self.hits)?;
        writeln!(f, "Misses: {}", self.misses)?;
        writeln!(f, "  Cold: {}", self.cold_misses)?;
        writeln!(f, "  Capacity: {}", self.capacity_misses)?;
        writeln!(f, "Hit Rate: {:.4}%", self.hit_rate * 100.0)?;
        write!(f, "--------------------------")
    }
}
