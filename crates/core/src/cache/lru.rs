//! Least Recently Used (LRU) Victim Selection.
//!
//! Every way carries the value of the global access clock at the time it was last
//! touched. The least recently used way is simply the one with the smallest stamp,
//! so victim selection is a single linear scan and a hit only rewrites one integer.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per miss, where W is the associativity.
//! - **Space Complexity:** One `u64` per way.
//! - **Best Case:** Small associativity (the common ≤16-way case).

use super::Way;

/// Picks the way to evict from a full set.
///
/// Returns the index of the way with the strictly smallest `recency`. Ties go to the
/// lowest way index, which keeps replacement deterministic.
///
/// # Arguments
///
/// * `ways` - The ways of one set. Must not be empty.
pub(crate) fn select_victim(ways: &[Way]) -> usize {
    let mut victim = 0;
    let mut oldest = u64::MAX;
    for (i, way) in ways.iter().enumerate() {
        if way.recency < oldest {
            oldest = way.recency;
            victim = i;
        }
    }
    victim
}

/// Picks the lowest-indexed invalid way, if the set still has one.
pub(crate) fn first_invalid(ways: &[Way]) -> Option<usize> {
    ways.iter().position(|way| !way.valid)
}
