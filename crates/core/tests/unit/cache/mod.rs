//! Cache component tests.



/// Randomised invariants over arbitrary access streams.
pub mod properties;
