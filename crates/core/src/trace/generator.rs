//! Synthetic Trace Generator.
//!
//! Produces a workload mixing three access patterns:
//! - 50% sequential reads walking forward one word at a time (spatial locality),
//! - 30% writes to a single hot address (temporal locality),
//! - 20% reads to random word-aligned addresses in the low 256 KiB.
//!
//! Randomness comes from a xorshift64 generator so a given seed always yields the
//! same trace.

use super::AccessRecord;
use crate::common::constants::{TRACE_HOT_BASE, TRACE_SEQUENTIAL_BASE, TRACE_WORD_BYTES};

/// Replaces a zero seed, which would lock xorshift at zero forever.
const FALLBACK_SEED: u64 = 123456789;

/// Number of distinct hot-address candidates above [`TRACE_HOT_BASE`].
const HOT_CANDIDATES: u64 = 20;

/// Exclusive bound on the word number of a random access.
const RANDOM_WORDS: u64 = 0xFFFF;

/// Deterministic generator of mixed-locality access records.
#[derive(Clone, Debug)]
pub struct TraceGenerator {
    state: u64,
    hot_addr: u64,
}

impl TraceGenerator {
    /// Creates a generator from `seed` and picks its hot address.
    pub fn new(seed: u64) -> Self {
        let mut generator = Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
            hot_addr: 0,
        };
        generator.hot_addr =
            TRACE_HOT_BASE + (generator.next_u64() % HOT_CANDIDATES) * TRACE_WORD_BYTES;
        generator
    }

    /// The address written by every temporal-locality access.
    #[inline]
    pub const fn hot_addr(&self) -> u64 {
        self.hot_addr
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Produces the record for position `i` of the trace.
    fn record_at(&mut self, i: u64) -> AccessRecord {
        match self.next_u64() % 100 {
            0..50 => AccessRecord::read(TRACE_SEQUENTIAL_BASE + i * TRACE_WORD_BYTES),
            50..80 => AccessRecord::write(self.hot_addr),
            _ => AccessRecord::read((self.next_u64() % RANDOM_WORDS) * TRACE_WORD_BYTES),
        }
    }

    /// Generates `count` records.
    pub fn generate(&mut self, count: usize) -> Vec<AccessRecord> {
        (0..count as u64).map(|i| self.record_at(i)).collect()
    }
}
