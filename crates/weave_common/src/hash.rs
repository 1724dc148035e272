//! Content fingerprints for memoization keys and change detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit content hash computed using XXH3.
///
/// Two values with the same `ContentHash` are assumed to have identical
/// content. Snapshots carry one so cache lookups can hash and reject in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Returns the raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
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

/// Streaming builder for a [`ContentHash`] over structured fields.
///
/// Strings and sequences are length-prefixed so that `["ab", "c"]` and
/// `["a", "bc"]` never collide.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Creates a hasher with an empty state.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds raw bytes without a length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Feeds a `u32` in little-endian order.
    pub fn write_u32(&mut self, value: u32) {
        self.state.update(&value.to_le_bytes());
    }

    /// Feeds a length as a `u64`.
    pub fn write_len(&mut self, len: usize) {
        self.state.update(&(len as u64).to_le_bytes());
    }

    /// Feeds a length-prefixed string.
    pub fn write_str(&mut self, s: &str) {
        self.write_len(s.len());
        self.state.update(s.as_bytes());
    }

    /// Feeds a length-prefixed sequence of strings.
    pub fn write_strs<S: AsRef<str>>(&mut self, items: &[S]) {
        self.write_len(items.len());
        for item in items {
            self.write_str(item.as_ref());
        }
    }

    /// Finishes hashing and returns the 128-bit digest.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
