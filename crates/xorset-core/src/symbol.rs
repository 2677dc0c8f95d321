//! Coded symbols: XOR accumulators with signed insertion counts.

use serde::{Deserialize, Serialize};

use crate::Fingerprint;

/// The atomic unit of a sketch.
///
/// `key_sum` and `value_sum` accumulate the XOR of the fingerprints of every
/// entry mapped into this symbol; `count` is the net number of insertions
/// minus deletions. XOR-combining two symbols from independent sketches
/// while subtracting their counts yields the symbol of the set difference at
/// that position, which is the fundamental operation of the whole design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodedSymbol {
    /// XOR of the key fingerprints of all entries mapped here
    pub key_sum: Fingerprint,
    /// XOR of the value fingerprints of all entries mapped here
    pub value_sum: Fingerprint,
    /// Net insertions minus deletions mapped here
    pub count: i64,
}

impl CodedSymbol {
    /// Fold one entry's fingerprints into the symbol.
    ///
    /// `direction` is `+1` for an insertion and `-1` for a deletion or a
    /// decode-time cancellation.
    pub fn apply(&mut self, key_fp: Fingerprint, value_fp: Fingerprint, direction: i64) {
        self.key_sum ^= key_fp;
        self.value_sum ^= value_fp;
        self.count += direction;
    }

    /// Difference of two symbols: XOR of both sums, subtraction of counts.
    #[must_use]
    pub fn combine(&self, other: &CodedSymbol) -> CodedSymbol {
        CodedSymbol {
            key_sum: self.key_sum ^ other.key_sum,
            value_sum: self.value_sum ^ other.value_sum,
            count: self.count - other.count,
        }
    }

    /// A pure symbol holds exactly one uncancelled entry.
    ///
    /// Every even multiple of the same fingerprint cancels under XOR, so the
    /// surviving sums of a pure symbol are exactly that entry's fingerprints
    /// and can be read off directly.
    pub fn is_pure(&self) -> bool {
        self.count.abs() == 1
    }

    /// True once every contribution has cancelled out.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.key_sum.is_zero() && self.value_sum.is_zero()
    }
}
