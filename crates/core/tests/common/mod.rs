//! Shared helpers for cache tests.

use cachesim_core::{CacheGeometry, CacheSim};

/// 256-byte, 64-byte-block, 2-way cache.
///
/// With these parameters:
///   - num_blocks = 256 / 64 = 4
///   - num_sets   = 4 / 2 = 2
///   - offset_bits = 6, index_bits = 1, tag_bits = 57
///
/// Set index = (addr >> 6) & 1
/// Tag       = addr >> 7
pub fn two_set_two_way() -> CacheGeometry {
    CacheGeometry::new(256, 64, 2).unwrap()
}

/// Builds the block-aligned address that maps to `index` with `tag` under `geometry`.
pub fn addr_for(geometry: &CacheGeometry, index: u64, tag: u64) -> u64 {
    let offset = geometry.offset_bits();
    (tag << (geometry.index_bits() + offset)) | (index << offset)
}

/// A fresh engine over [`two_set_two_way`].
pub fn small_cache() -> CacheSim {
    CacheSim::new(two_set_two_way()).unwrap()
}

/// Installs a test subscriber so `RUST_LOG=trace cargo test` shows engine events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
