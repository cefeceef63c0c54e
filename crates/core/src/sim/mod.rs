//! Simulation driver.
//!
//! Ties a configured cache engine to a stream of access records and collects the
//! resulting statistics.

/// Simulation session (engine plus counters).
pub mod simulator;

pub use simulator::Simulator;
