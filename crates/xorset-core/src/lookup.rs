//! Reverse fingerprint lookup for a reconciliation session.

use std::collections::BTreeMap;

use crate::Fingerprint;

/// Maps fingerprints back to the byte strings that produced them.
///
/// A table is created once per reconciliation session, populated by every
/// insertion or deletion on either side, merged with the peer's table before
/// decoding, and only read from that point on. The sketch structures
/// themselves are oblivious to original bytes; decoding cannot recover
/// strings for fingerprints known only to the peer, which is why the merge
/// must happen first. An unmerged fingerprint is not fatal: the decoder
/// skips it and a later pass after a merge picks it up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseTable {
    keys: BTreeMap<Fingerprint, Vec<u8>>,
    values: BTreeMap<Fingerprint, Vec<u8>>,
}

impl ReverseTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the bytes behind a key fingerprint.
    ///
    /// First writer wins; the mapping is append-only within a session.
    pub fn record_key(&mut self, fp: Fingerprint, bytes: &[u8]) {
        self.keys.entry(fp).or_insert_with(|| bytes.to_vec());
    }

    /// Remember the bytes behind a value fingerprint.
    pub fn record_value(&mut self, fp: Fingerprint, bytes: &[u8]) {
        self.values.entry(fp).or_insert_with(|| bytes.to_vec());
    }

    /// Resolve a key fingerprint to its original bytes.
    pub fn key_bytes(&self, fp: &Fingerprint) -> Option<&[u8]> {
        self.keys.get(fp).map(Vec::as_slice)
    }

    /// Resolve a value fingerprint to its original bytes.
    pub fn value_bytes(&self, fp: &Fingerprint) -> Option<&[u8]> {
        self.values.get(fp).map(Vec::as_slice)
    }

    /// Absorb every mapping the peer knows about.
    pub fn merge(&mut self, other: &ReverseTable) {
        for (fp, bytes) in &other.keys {
            self.keys.entry(*fp).or_insert_with(|| bytes.clone());
        }
        for (fp, bytes) in &other.values {
            self.values.entry(*fp).or_insert_with(|| bytes.clone());
        }
    }

    /// Number of key mappings held.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of value mappings held.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// True when no mapping has been recorded.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_resolves() {
        let mut table = ReverseTable::new();
        let fp = Fingerprint::digest(b"key");
        assert!(table.key_bytes(&fp).is_none());

        table.record_key(fp, b"key");
        assert_eq!(table.key_bytes(&fp), Some(b"key".as_slice()));
        assert_eq!(table.key_count(), 1);
        assert_eq!(table.value_count(), 0);
    }

    #[test]
    fn merge_takes_union() {
        let mut ours = ReverseTable::new();
        let mut theirs = ReverseTable::new();
        let shared = Fingerprint::digest(b"shared");
        let peer_only = Fingerprint::digest(b"peer");

        ours.record_key(shared, b"shared");
        theirs.record_key(shared, b"shared");
        theirs.record_key(peer_only, b"peer");
        theirs.record_value(Fingerprint::digest(b"v"), b"v");

        ours.merge(&theirs);
        assert_eq!(ours.key_count(), 2);
        assert_eq!(ours.value_count(), 1);
        assert_eq!(ours.key_bytes(&peer_only), Some(b"peer".as_slice()));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut ours = ReverseTable::new();
        let mut theirs = ReverseTable::new();
        theirs.record_key(Fingerprint::digest(b"k"), b"k");

        ours.merge(&theirs);
        let snapshot = ours.clone();
        ours.merge(&theirs);
        assert_eq!(ours, snapshot);
    }
}
