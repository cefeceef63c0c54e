//! Simulator-wide constants.

/// Width of a simulated address in bits.
///
/// `offset_bits + index_bits + tag_bits` always equals this value.
pub const ADDRESS_WIDTH: u32 = 64;

/// Number of bytes in one kilobyte of configured cache size.
pub const BYTES_PER_KB: u64 = 1024;

/// Base address of the sequential (spatial locality) stream in generated traces.
pub const TRACE_SEQUENTIAL_BASE: u64 = 0x10000;

/// Base address of the region the hot (temporal locality) address is drawn from.
pub const TRACE_HOT_BASE: u64 = 0x1A000;

/// Stride in bytes between consecutive generated accesses.
pub const TRACE_WORD_BYTES: u64 = 4;

/// Default number of records in a generated trace.
pub const TRACE_DEFAULT_COUNT: usize = 5000;
