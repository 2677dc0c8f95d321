//! Key/value entries exchanged through reconciliation.

use serde::{Deserialize, Serialize};

/// A (key, value) pair of arbitrary byte strings.
///
/// Entries are never stored inside a sketch; only their fingerprints are.
/// The decoder reconstructs entries from pure symbols via the session's
/// [`ReverseTable`](crate::ReverseTable).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// The key bytes
    pub key: Vec<u8>,
    /// The value bytes
    pub value: Vec<u8>,
}

impl Entry {
    /// Build an entry from anything convertible to owned bytes.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
