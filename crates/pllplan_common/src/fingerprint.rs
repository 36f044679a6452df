//! Content fingerprints for detecting changes in generated configurations.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit content hash computed using XXH3.
///
/// Two solved configurations with the same `ContentHash` are assumed to be
/// identical. The surrounding build uses this to decide whether a regenerated
/// clocking block changed since the last run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Incremental builder for a [`ContentHash`] over typed fields.
///
/// Floats are hashed by their bit pattern, so `0.0` and `-0.0` differ. Every
/// field is written little-endian with no separators; callers must write
/// fields in a fixed order.
pub struct Fingerprinter {
    state: Xxh3,
}

impl Fingerprinter {
    /// Creates an empty fingerprinter.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds a `u32` field.
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.state.update(&value.to_le_bytes());
        self
    }

    /// Feeds a `u64` field.
    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.state.update(&value.to_le_bytes());
        self
    }

    /// Feeds an `f64` field by bit pattern.
    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.write_u64(value.to_bits())
    }

    /// Finishes hashing.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
