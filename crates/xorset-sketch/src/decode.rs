//! The shared peeling decoder.
//!
//! Both sketch types decode the same way: find a pure symbol, read the
//! surviving fingerprints off its sums, resolve them to bytes through the
//! session lookup table, and cancel the entry's contribution everywhere it
//! was mapped, which may expose new pure symbols. The loop here is worklist
//! driven - an explicit queue of indices newly made pure by each
//! cancellation - rather than a rescan-from-scratch pass, so a decode costs
//! one queue visit per touched symbol instead of a full table scan per
//! recovery. Recovery order is unspecified; any order reaches the same
//! fixed point.

use std::collections::VecDeque;

use tracing::{debug, trace};
use xorset_core::{CodedSymbol, Entry, Fingerprint, ReverseTable};

/// The outcome of one decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Entries present only in the left operand of the difference
    pub added: Vec<Entry>,
    /// Entries present only in the right operand
    pub removed: Vec<Entry>,
    /// True when every symbol cancelled to zero. False means residue of
    /// unknown size remains: the table was under capacity, the symbol
    /// stream too short, or some fingerprints are not resolvable yet.
    pub complete: bool,
}

/// An entry recovered from a pure symbol, with the fingerprints needed to
/// cancel it out of every other symbol it touched.
#[derive(Debug, Clone)]
pub(crate) struct Recovered {
    pub entry: Entry,
    pub key_fp: Fingerprint,
    pub value_fp: Fingerprint,
    /// +1 when the entry was exclusive to the left operand, -1 to the right
    pub sign: i64,
}

/// Peel `symbols` to a fixed point.
///
/// `mapped` must reproduce the encode-time mapping of a key: every index it
/// contributes to, duplicates included (a fixed-table key whose salted
/// slots collide is XORed into that cell twice at encode time, so the
/// cancellation must hit it twice as well). Pure symbols whose fingerprints
/// the lookup table cannot resolve are left standing as undecodable
/// residue; they re-enter the queue only if a later cancellation touches
/// them, so an unresolvable cell never stalls the rest of the decode.
pub(crate) fn peel<M>(
    symbols: &mut [CodedSymbol],
    lookup: &ReverseTable,
    mapped: M,
) -> (Vec<Recovered>, bool)
where
    M: Fn(&Fingerprint, &[u8], usize) -> Vec<usize>,
{
    let total = symbols.len();
    let mut queue: VecDeque<usize> = (0..total).filter(|&i| symbols[i].is_pure()).collect();
    let mut recovered = Vec::new();

    while let Some(index) = queue.pop_front() {
        let symbol = symbols[index];
        if !symbol.is_pure() {
            continue;
        }
        let Some(key) = lookup.key_bytes(&symbol.key_sum) else {
            // Known only to the peer until a table merge happens.
            continue;
        };
        let Some(value) = lookup.value_bytes(&symbol.value_sum) else {
            continue;
        };
        let rec = Recovered {
            entry: Entry::new(key, value),
            key_fp: symbol.key_sum,
            value_fp: symbol.value_sum,
            sign: symbol.count.signum(),
        };
        trace!(index, sign = rec.sign, key_fp = %rec.key_fp, "recovered entry from pure symbol");

        for touched in mapped(&rec.key_fp, &rec.entry.key, total) {
            symbols[touched].apply(rec.key_fp, rec.value_fp, -rec.sign);
            if symbols[touched].is_pure() {
                queue.push_back(touched);
            }
        }
        recovered.push(rec);
    }

    let complete = symbols.iter().all(CodedSymbol::is_empty);
    debug!(
        recovered = recovered.len(),
        residue = symbols.iter().filter(|s| !s.is_empty()).count(),
        complete,
        "peeling pass finished"
    );
    (recovered, complete)
}

/// Split recovered entries by sign into the public result shape.
pub(crate) fn split(recovered: Vec<Recovered>, complete: bool) -> Decoded {
    let mut decoded = Decoded {
        complete,
        ..Decoded::default()
    };
    for rec in recovered {
        if rec.sign > 0 {
            decoded.added.push(rec.entry);
        } else {
            decoded.removed.push(rec.entry);
        }
    }
    decoded
}
