//! The rateless sketch: an unbounded, on-demand coded-symbol stream.

use serde::{Deserialize, Serialize};
use tracing::debug;
use xorset_core::{CodedSymbol, Entry, Fingerprint, Result, ReverseTable, SketchError};

use crate::config::{RatelessConfig, DEFAULT_ALPHA};
use crate::decode::{self, Decoded};
use crate::mapping::{mapped_indices, maps_to_index};

/// A sketch whose coded symbols are generated lazily, one index at a time.
///
/// Nothing is precomputed at insert time; symbol `i` is folded over the
/// entry list whenever it is requested, at cost linear in the number of
/// entries. Low indices include almost every key, high indices almost none,
/// so the stream can extend indefinitely without pre-agreeing on a size.
/// Generation is read-only over the entry list, so independent indices can
/// be produced in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatelessSketch {
    alpha: f64,
    entries: Vec<(Fingerprint, Fingerprint)>,
}

impl Default for RatelessSketch {
    fn default() -> Self {
        Self::new()
    }
}

impl RatelessSketch {
    /// An empty sketch with the default decay rate.
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            entries: Vec::new(),
        }
    }

    /// An empty sketch with a caller-chosen decay rate.
    pub fn with_alpha(alpha: f64) -> Result<Self> {
        RatelessConfig { alpha }.validate()?;
        Ok(Self {
            alpha,
            entries: Vec::new(),
        })
    }

    /// The degree-decay rate.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of inserted entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a (key, value) pair.
    ///
    /// Only the fingerprints are kept; they are also recorded in the
    /// session lookup table for the decoder. No symbol state is touched.
    pub fn insert(&mut self, lookup: &mut ReverseTable, key: &[u8], value: &[u8]) {
        let key_fp = Fingerprint::digest(key);
        let value_fp = Fingerprint::digest(value);
        lookup.record_key(key_fp, key);
        lookup.record_value(value_fp, value);
        self.entries.push((key_fp, value_fp));
    }

    /// Fold every mapped entry into coded symbol `index`.
    pub fn generate_symbol(&self, index: u64) -> CodedSymbol {
        let mut symbol = CodedSymbol::default();
        for &(key_fp, value_fp) in &self.entries {
            if maps_to_index(&key_fp, index, self.alpha) {
                symbol.apply(key_fp, value_fp, 1);
            }
        }
        symbol
    }

    /// Start a difference decode against a peer sketch over the first
    /// `symbol_count` indices.
    ///
    /// Fails fast when the decay rates differ: streams sampled under
    /// different degree distributions do not cancel, and nothing downstream
    /// could detect the damage. If `symbol_count` turns out too small to
    /// finish decoding, extend the returned session rather than starting
    /// over; more symbols never lose previously decoded entries.
    pub fn subtract<'a>(
        &'a self,
        other: &'a RatelessSketch,
        symbol_count: usize,
    ) -> Result<RatelessDifference<'a>> {
        if self.alpha != other.alpha {
            return Err(SketchError::AlphaMismatch {
                left: self.alpha,
                right: other.alpha,
            });
        }
        let mut session = RatelessDifference {
            left: self,
            right: other,
            symbols: Vec::with_capacity(symbol_count),
            recovered: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        };
        session.extend_to(symbol_count);
        debug!(symbol_count, "built rateless difference stream");
        Ok(session)
    }
}

/// An in-progress rateless difference decode.
///
/// Holds the combined symbol stream and everything recovered so far. The
/// session is monotonic: growing the stream cancels already-recovered
/// entries out of each new symbol before it is stored, so earlier results
/// are preserved and extended, never recomputed from scratch.
#[derive(Debug)]
pub struct RatelessDifference<'a> {
    left: &'a RatelessSketch,
    right: &'a RatelessSketch,
    symbols: Vec<CodedSymbol>,
    /// Fingerprints and sign of every entry peeled so far
    recovered: Vec<(Fingerprint, Fingerprint, i64)>,
    added: Vec<Entry>,
    removed: Vec<Entry>,
}

impl RatelessDifference<'_> {
    /// Number of combined symbols currently held.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// The combined symbol stream.
    pub fn symbols(&self) -> &[CodedSymbol] {
        &self.symbols
    }

    /// Entries recovered so far that only the left sketch holds.
    pub fn added(&self) -> &[Entry] {
        &self.added
    }

    /// Entries recovered so far that only the right sketch holds.
    pub fn removed(&self) -> &[Entry] {
        &self.removed
    }

    /// True when every held symbol has cancelled to zero.
    pub fn is_complete(&self) -> bool {
        self.symbols.iter().all(CodedSymbol::is_empty)
    }

    /// Grow the stream to `symbol_count` combined symbols.
    ///
    /// Requesting no more than already present is a no-op. Each new symbol
    /// is the per-index combination of the two sketches with the
    /// contributions of already-recovered entries cancelled out, keeping
    /// the decode monotonic across extensions.
    pub fn extend_to(&mut self, symbol_count: usize) {
        let alpha = self.left.alpha;
        for index in self.symbols.len()..symbol_count {
            let index = index as u64;
            let mut symbol = self
                .left
                .generate_symbol(index)
                .combine(&self.right.generate_symbol(index));
            for &(key_fp, value_fp, sign) in &self.recovered {
                if maps_to_index(&key_fp, index, alpha) {
                    symbol.apply(key_fp, value_fp, -sign);
                }
            }
            self.symbols.push(symbol);
        }
    }

    /// Peel the current stream and drain newly recoverable entries.
    ///
    /// Cancellation replays the inclusion rule over every in-range index;
    /// a rateless key's membership is a sampled predicate, not a fixed slot
    /// list. Unresolvable pure symbols are left standing for a later call
    /// (after a lookup merge or a stream extension). A second call with no
    /// new symbols or mappings returns empty lists.
    pub fn list_differences(&mut self, lookup: &ReverseTable) -> Decoded {
        let alpha = self.left.alpha;
        let (batch, complete) = decode::peel(&mut self.symbols, lookup, |key_fp, _, total| {
            mapped_indices(key_fp, total, alpha)
        });
        let mut decoded = Decoded {
            complete,
            ..Decoded::default()
        };
        for rec in batch {
            self.recovered.push((rec.key_fp, rec.value_fp, rec.sign));
            if rec.sign > 0 {
                decoded.added.push(rec.entry.clone());
                self.added.push(rec.entry);
            } else {
                decoded.removed.push(rec.entry.clone());
                self.removed.push(rec.entry);
            }
        }
        decoded
    }
}
