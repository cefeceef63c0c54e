//! Cache Geometry Calculator.
//!
//! Derives the shape of a set-associative cache from its three configuration inputs
//! (total size, block size, associativity) and splits a 64-bit address into the
//! offset, index, and tag fields that shape implies.
//!
//! All bit widths are computed with exact integer arithmetic. A block size or set
//! count that is not a power of two cannot be split into whole address bits and is
//! rejected rather than truncated.

use serde::Serialize;

use crate::common::constants::ADDRESS_WIDTH;
use crate::common::error::ConfigError;

/// Immutable shape of a set-associative cache.
///
/// Invariants (established by [`CacheGeometry::new`]):
/// - `block_size_bytes` and `num_sets` are non-zero powers of two.
/// - `cache_size_bytes == num_sets * associativity * block_size_bytes`.
/// - `offset_bits + index_bits + tag_bits == 64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheGeometry {
    cache_size_bytes: u64,
    block_size_bytes: u64,
    associativity: u64,
    num_sets: u64,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

impl CacheGeometry {
    /// Computes a geometry from raw configuration values.
    ///
    /// # Arguments
    ///
    /// * `cache_size_bytes` - Total data capacity in bytes.
    /// * `block_size_bytes` - Size of one cache line in bytes.
    /// * `associativity` - Number of ways per set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCacheSize`] / [`ConfigError::ZeroBlockSize`] for zero inputs.
    /// - [`ConfigError::BlockSizeNotPowerOfTwo`] if the block size has more than one bit set.
    /// - [`ConfigError::InvalidAssociativity`] if `associativity == 0`.
    /// - [`ConfigError::DegenerateGeometry`] if the cache holds fewer than one full set.
    /// - [`ConfigError::SetCountNotPowerOfTwo`] if the derived set count is not a power of two.
    /// - [`ConfigError::InexactGeometry`] if either division leaves a remainder.
    pub fn new(
        cache_size_bytes: u64,
        block_size_bytes: u64,
        associativity: u64,
    ) -> Result<Self, ConfigError> {
        if cache_size_bytes == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        if block_size_bytes == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if !block_size_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_size_bytes));
        }
        if associativity == 0 {
            return Err(ConfigError::InvalidAssociativity);
        }

        let num_blocks = cache_size_bytes / block_size_bytes;
        let num_sets = num_blocks / associativity;

        if num_sets == 0 {
            return Err(ConfigError::DegenerateGeometry {
                cache_size_bytes,
                block_size_bytes,
                associativity,
            });
        }
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }
        if cache_size_bytes % block_size_bytes != 0 || num_blocks % associativity != 0 {
            return Err(ConfigError::InexactGeometry {
                cache_size_bytes,
                block_size_bytes,
                associativity,
            });
        }

        let offset_bits = block_size_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        // num_sets * block_size <= cache_size < 2^64, so this cannot underflow.
        let tag_bits = ADDRESS_WIDTH - index_bits - offset_bits;

        let geometry = Self {
            cache_size_bytes,
            block_size_bytes,
            associativity,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits,
        };

        tracing::debug!(
            num_sets,
            associativity,
            offset_bits,
            index_bits,
            tag_bits,
            "derived cache geometry"
        );

        Ok(geometry)
    }

    /// Total data capacity in bytes.
    #[inline]
    pub const fn cache_size_bytes(&self) -> u64 {
        self.cache_size_bytes
    }

    /// Size of one cache line in bytes.
    #[inline]
    pub const fn block_size_bytes(&self) -> u64 {
        self.block_size_bytes
    }

    /// Number of ways per set.
    #[inline]
    pub const fn associativity(&self) -> u64 {
        self.associativity
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Total number of blocks (`num_sets * associativity`).
    #[inline]
    pub const fn num_blocks(&self) -> u64 {
        self.num_sets * self.associativity
    }

    /// Low-order bits selecting a byte within a block.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Mid-order bits selecting a set.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// High-order bits identifying a block within its set.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Splits an address into its `(set index, tag)` pair.
    ///
    /// Every 64-bit pattern maps to a valid pair, so this cannot fail. Both shift
    /// amounts are below 64 by construction.
    #[inline]
    pub const fn decompose(&self, addr: u64) -> (u64, u64) {
        let no_offset = match addr.checked_shr(self.offset_bits) {
            Some(v) => v,
            None => 0,
        };
        let index_mask = match 1u64.checked_shl(self.index_bits) {
            Some(v) => v - 1,
            None => u64::MAX,
        };
        let tag = match no_offset.checked_shr(self.index_bits) {
            Some(v) => v,
            None => 0,
        };
        (no_offset & index_mask, tag)
    }

    /// Returns `addr` with its offset bits cleared.
    #[inline]
    pub const fn block_address(&self, addr: u64) -> u64 {
        addr & !(self.block_size_bytes - 1)
    }
}
