//! Memory Access Types.
//!
//! Classifies the direction of each record in an access trace. The engine treats
//! reads and writes identically; the direction is kept so statistics and
//! regenerated traces stay faithful to the input.

use serde::{Deserialize, Serialize};

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    /// Data read access (`R` in a trace file).
    Read,

    /// Data write access (`W` in a trace file).
    Write,
}

impl AccessType {
    /// Returns the single-letter trace mnemonic for this access.
    pub const fn mnemonic(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }

    /// Decodes a direction token from a trace line.
    ///
    /// Only the first character is significant, so `R`, `r`, and `READ` are all reads.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.chars().next()? {
            'R' | 'r' => Some(Self::Read),
            'W' | 'w' => Some(Self::Write),
            _ => None,
        }
    }
}
