//! The bounded, fixed-size sketch (an invertible Bloom lookup table).

use serde::{Deserialize, Serialize};
use tracing::debug;
use xorset_core::{CodedSymbol, Fingerprint, Result, ReverseTable, SketchError};

use crate::config::FixedConfig;
use crate::decode::{self, Decoded};
use crate::mapping::slot_indices;

/// A fixed-size table of coded symbols.
///
/// Each entry is scattered into `hash_count` slots chosen by salted hashes
/// of its key. Insertion and deletion are exact inverses under XOR, so the
/// per-slot difference of two tables encodes the symmetric difference of
/// the two underlying sets and nothing else. The table is never resized;
/// when the true difference outgrows it, decoding returns the recoverable
/// subset with `complete == false` and the caller re-encodes larger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSketch {
    symbols: Vec<CodedSymbol>,
    hash_count: u32,
}

impl FixedSketch {
    /// An empty sketch with `size` symbols and `hash_count` slots per key.
    pub fn new(size: usize, hash_count: u32) -> Result<Self> {
        Self::with_config(&FixedConfig { size, hash_count })
    }

    /// An empty sketch from a validated configuration.
    pub fn with_config(config: &FixedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            symbols: vec![CodedSymbol::default(); config.size],
            hash_count: config.hash_count,
        })
    }

    /// Number of coded symbols in the table.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Slots each key is scattered into.
    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// The raw symbol table.
    pub fn symbols(&self) -> &[CodedSymbol] {
        &self.symbols
    }

    /// Add a (key, value) pair.
    ///
    /// Both fingerprints are recorded in the session lookup table so the
    /// decoder can map them back to bytes later. Inserting the same pair
    /// twice doubles its count contribution; the algebra only cancels when
    /// insertions and deletions balance.
    pub fn insert(&mut self, lookup: &mut ReverseTable, key: &[u8], value: &[u8]) {
        self.scatter(lookup, key, value, 1);
    }

    /// Remove a previously inserted pair.
    ///
    /// The same slots are touched with the XOR (its own inverse) and the
    /// count decremented, so insert followed by delete of one pair leaves
    /// every symbol unchanged. Deleting a pair that was never inserted
    /// silently corrupts decode results for that pair.
    pub fn delete(&mut self, lookup: &mut ReverseTable, key: &[u8], value: &[u8]) {
        self.scatter(lookup, key, value, -1);
    }

    fn scatter(&mut self, lookup: &mut ReverseTable, key: &[u8], value: &[u8], direction: i64) {
        let key_fp = Fingerprint::digest(key);
        let value_fp = Fingerprint::digest(value);
        lookup.record_key(key_fp, key);
        lookup.record_value(value_fp, value);
        for index in slot_indices(key, self.hash_count, self.symbols.len()) {
            self.symbols[index].apply(key_fp, value_fp, direction);
        }
    }

    /// The per-slot difference of two equally parameterized sketches.
    ///
    /// Fails fast on mismatched parameters: tables built with a different
    /// size or hash count combine into meaningless garbage that no runtime
    /// check could detect afterwards, so the contract rejects the pair at
    /// the boundary. In the result, `count == +1` cells denote entries
    /// present only in `self`, `count == -1` entries present only in
    /// `other`.
    pub fn difference(&self, other: &FixedSketch) -> Result<FixedSketch> {
        if self.size() != other.size() {
            return Err(SketchError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        if self.hash_count != other.hash_count {
            return Err(SketchError::HashCountMismatch {
                left: self.hash_count,
                right: other.hash_count,
            });
        }
        let symbols = self
            .symbols
            .iter()
            .zip(&other.symbols)
            .map(|(a, b)| a.combine(b))
            .collect();
        debug!(size = self.size(), "combined fixed sketches");
        Ok(FixedSketch {
            symbols,
            hash_count: self.hash_count,
        })
    }

    /// Peel the table and drain every recoverable entry.
    ///
    /// Partial results are always returned; inspect
    /// [`Decoded::complete`](crate::Decoded) to know whether residue
    /// remains. Residue stays in place, so a later call after merging more
    /// lookup mappings resumes where this one stopped, and a call on a
    /// fully peeled table returns empty lists.
    pub fn list_differences(&mut self, lookup: &ReverseTable) -> Decoded {
        let hash_count = self.hash_count;
        let (recovered, complete) = decode::peel(&mut self.symbols, lookup, |_, key, total| {
            slot_indices(key, hash_count, total)
        });
        decode::split(recovered, complete)
    }
}
