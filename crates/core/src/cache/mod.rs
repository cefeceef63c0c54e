//! Set-Associative Cache Simulator.
//!
//! This module implements the cache engine. It models:
//! 1. **Address decomposition:** Splitting an address into offset, set index, and tag.
//! 2. **Lookup:** Scanning the ways of the selected set for a valid, matching tag.
//! 3. **Placement:** Filling the lowest-indexed empty way on a cold miss.
//! 4. **Replacement:** Evicting the least recently used way when the set is full.
//!
//! Recency is a logical clock advanced once per access, not wall-clock time.

/// Cache shape derivation and address decomposition.
pub mod geometry;

/// LRU victim selection.
mod lru;

use serde::Serialize;

use crate::common::error::ConfigError;

pub use self::geometry::CacheGeometry;

/// One slot within a set, capable of holding one block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Way {
    /// Whether the slot holds a block. Starts false.
    pub valid: bool,
    /// Tag of the resident block; meaningful only when `valid`.
    pub tag: u64,
    /// Clock value of the most recent access to this block; meaningful only when `valid`.
    pub recency: u64,
}

/// Kind of miss reported by [`CacheSim::access`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MissKind {
    /// The block was placed in an empty (invalid) way.
    Cold,
    /// A valid way had to be evicted to make room (capacity or conflict miss).
    Capacity,
}

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// The block was resident.
    Hit,
    /// The block was not resident and has now been installed.
    Miss(MissKind),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Cache engine: a flat array of ways plus the global LRU clock.
///
/// Way `w` of set `s` lives at `s * associativity + w`. The array is allocated once
/// and never resized.
#[derive(Clone, Debug)]
pub struct CacheSim {
    geometry: CacheGeometry,
    ways: Vec<Way>,
    associativity: usize,
    clock: u64,
}

impl CacheSim {
    /// Creates an empty (all ways invalid) cache sized exactly to `geometry`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CacheTooLarge`] if the way array does not fit in the address
    /// space or cannot be reserved.
    pub fn new(geometry: CacheGeometry) -> Result<Self, ConfigError> {
        let num_blocks = geometry.num_blocks();
        let too_large = || ConfigError::CacheTooLarge { num_blocks };

        let slots = usize::try_from(num_blocks).map_err(|_| too_large())?;
        let associativity = usize::try_from(geometry.associativity()).map_err(|_| too_large())?;

        let mut ways = Vec::new();
        ways.try_reserve_exact(slots).map_err(|err| {
            tracing::debug!(%err, num_blocks, "way array allocation failed");
            too_large()
        })?;
        ways.resize(slots, Way::default());

        Ok(Self {
            geometry,
            ways,
            associativity,
            clock: 0,
        })
    }

    /// The geometry this cache was built from.
    #[inline]
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Number of accesses processed so far (the current clock value).
    #[inline]
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Accesses the cache for the specified address.
    ///
    /// Advances the clock, then looks the block up in its set. On a hit the matching
    /// way's recency is refreshed. On a miss the block is installed in the lowest
    /// empty way, or over the least recently used way if the set is full.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 64-bit address to access.
    ///
    /// # Returns
    ///
    /// [`Outcome::Hit`], [`MissKind::Cold`] when an empty way was filled, or
    /// [`MissKind::Capacity`] when a valid way was evicted.
    pub fn access(&mut self, addr: u64) -> Outcome {
        self.clock += 1;
        let now = self.clock;

        let (index, tag) = self.geometry.decompose(addr);
        let base = index as usize * self.associativity;
        let set = &mut self.ways[base..base + self.associativity];

        if let Some(way) = set.iter_mut().find(|w| w.valid && w.tag == tag) {
            way.recency = now;
            tracing::trace!(addr, index, tag, "hit");
            return Outcome::Hit;
        }

        let (slot, kind) = match lru::first_invalid(set) {
            Some(slot) => (slot, MissKind::Cold),
            None => (lru::select_victim(set), MissKind::Capacity),
        };

        tracing::trace!(addr, index, tag, way = slot, ?kind, "miss");

        set[slot] = Way {
            valid: true,
            tag,
            recency: now,
        };

        Outcome::Miss(kind)
    }

    /// Returns the ways of set `index`, or `None` if the index is out of range.
    pub fn set(&self, index: u64) -> Option<&[Way]> {
        let base = usize::try_from(index).ok()?.checked_mul(self.associativity)?;
        self.ways.get(base..base.checked_add(self.associativity)?)
    }

    /// Checks whether the block containing `addr` is resident.
    ///
    /// Does not advance the clock or update recency.
    pub fn contains(&self, addr: u64) -> bool {
        let (index, tag) = self.geometry.decompose(addr);
        self.set(index)
            .is_some_and(|set| set.iter().any(|w| w.valid && w.tag == tag))
    }

    /// Tags of the valid ways in set `index`, in way order.
    pub fn resident_tags(&self, index: u64) -> Vec<u64> {
        self.set(index)
            .map(|set| set.iter().filter(|w| w.valid).map(|w| w.tag).collect())
            .unwrap_or_default()
    }

    /// Invalidates every way and rewinds the clock, keeping the allocation.
    pub fn reset(&mut self) {
        self.ways.fill(Way::default());
        self.clock = 0;
    }
}
