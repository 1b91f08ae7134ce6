//! Burst identifiers

use std::fmt;

/// Identifies one spawned particle burst.
///
/// Ids are handed out by the engine that owns the burst, in spawn order, and
/// are never reused by that engine.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BurstId(pub u64);

impl BurstId {
    /// Create a BurstId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for BurstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BurstId({})", self.0)
    }
}

impl fmt::Display for BurstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "burst#{}", self.0)
    }
}
