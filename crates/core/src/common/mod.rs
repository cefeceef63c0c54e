//! Common types and constants shared across the simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Address width and the fixed trace-generation parameters.
//! 2. **Memory Access:** The direction of an access record (Read/Write).
//! 3. **Error Handling:** Configuration and trace error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and trace handling.
pub mod error;

pub use constants::ADDRESS_WIDTH;
pub use data::AccessType;
pub use error::{ConfigError, TraceError};
