//! Deterministic key-to-symbol mapping rules.
//!
//! Both sketch types scatter entries by pure functions of the key, so the
//! decoder can replay the exact encode-time pattern when cancelling a
//! recovered entry. Nothing here is memoized: replaying a decision for the
//! same (key, index) pair always agrees with every earlier derivation,
//! including ones made mid-decode or after the symbol stream has grown.

use xorset_core::Fingerprint;

/// The `hash_count` slot positions for a key in a fixed table of `size` cells.
///
/// Each position comes from an independently salted digest reduced modulo
/// `size` over the full 256-bit width. Positions may collide for one key;
/// duplicates are kept so that encoding and decode-time cancellation apply
/// identical patterns. A collision merely reduces that key's effective
/// redundancy.
pub fn slot_indices(key: &[u8], hash_count: u32, size: usize) -> Vec<usize> {
    (0..u64::from(hash_count))
        .map(|salt| Fingerprint::salted_digest(salt, key).reduce_mod(size as u64) as usize)
        .collect()
}

/// Whether a key participates in rateless symbol `index`.
///
/// A uniform draw in `[0, 1)` is derived from the key fingerprint salted
/// with the index, and the key maps in iff the draw is below
/// `rho(index) = 1 / (1 + alpha * index)`. The probability decreases with
/// the index: early symbols are dense (most keys map in, maximizing early
/// information), later symbols are sparse, which is what lets the stream
/// extend indefinitely while the expected load per new key stays
/// controlled. `rho(0) = 1`, so every key maps into symbol zero.
pub fn maps_to_index(key_fp: &Fingerprint, index: u64, alpha: f64) -> bool {
    let draw = Fingerprint::salted_digest(index, &key_fp.to_bytes());
    // Top 53 bits of the draw give a uniform f64 in [0, 1).
    let r = (draw.high_limb() >> 11) as f64 / (1u64 << 53) as f64;
    let rho = 1.0 / (1.0 + alpha * index as f64);
    r < rho
}

/// Every in-range index a key maps into, for decode-time cancellation.
pub fn mapped_indices(key_fp: &Fingerprint, total: usize, alpha: f64) -> Vec<usize> {
    (0..total as u64)
        .filter(|&index| maps_to_index(key_fp, index, alpha))
        .map(|index| index as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_are_deterministic_and_in_range() {
        let first = slot_indices(b"key", 3, 20);
        let second = slot_indices(b"key", 3, 20);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|&index| index < 20));
    }

    #[test]
    fn different_keys_scatter_differently() {
        // Not guaranteed for any two keys, but these differ under SHA-256.
        assert_ne!(slot_indices(b"a", 3, 1024), slot_indices(b"b", 3, 1024));
    }

    #[test]
    fn every_key_maps_into_symbol_zero() {
        for name in [&b"a"[..], b"b", b"c", b"d", b"some longer key"] {
            let fp = Fingerprint::digest(name);
            assert!(maps_to_index(&fp, 0, 0.5), "rho(0) is 1, draw < 1 always");
        }
    }

    #[test]
    fn inclusion_is_stable_across_calls() {
        let fp = Fingerprint::digest(b"stable");
        for index in 0..64 {
            assert_eq!(
                maps_to_index(&fp, index, 0.5),
                maps_to_index(&fp, index, 0.5)
            );
        }
    }

    #[test]
    fn density_decreases_with_index() {
        // Aggregate over many keys: early indices must be denser than late.
        let keys: Vec<Fingerprint> = (0u32..200)
            .map(|i| Fingerprint::digest(&i.to_le_bytes()))
            .collect();
        let density = |index: u64| {
            keys.iter()
                .filter(|fp| maps_to_index(fp, index, 0.5))
                .count()
        };
        let early = density(1);
        let late = density(200);
        assert!(
            early > late,
            "expected index 1 ({early} keys) denser than index 200 ({late} keys)"
        );
    }

    #[test]
    fn mapped_indices_match_pointwise_decisions() {
        let fp = Fingerprint::digest(b"replay");
        let all = mapped_indices(&fp, 50, 0.5);
        for index in 0..50usize {
            assert_eq!(
                all.contains(&index),
                maps_to_index(&fp, index as u64, 0.5)
            );
        }
        assert!(all.contains(&0));
    }
}
