//! 256-bit fingerprints over arbitrary byte strings.
//!
//! A fingerprint is the SHA-256 digest of its input, held as four u64 limbs
//! so that the XOR group operation and modulo reduction are plain integer
//! arithmetic rather than digest-buffer manipulation. Fingerprints stand in
//! for the original bytes everywhere inside a sketch; the bytes themselves
//! are only kept in the session [`ReverseTable`](crate::ReverseTable).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// Number of u64 limbs in a fingerprint.
pub const LIMBS: usize = 4;

/// A 256-bit fingerprint of a byte string.
///
/// Limbs are stored least-significant first. The design treats fingerprint
/// equality as byte-string equality: a collision between distinct inputs is
/// a documented, unrecoverable limitation rather than a handled case, which
/// is an acceptable trade at 256 bits of digest width.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Fingerprint([u64; LIMBS]);

impl Fingerprint {
    /// The all-zero fingerprint, identity of the XOR group.
    pub const ZERO: Self = Fingerprint([0; LIMBS]);

    /// Digest arbitrary bytes into a fingerprint.
    pub fn digest(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self::from_bytes(hasher.finalize().into())
    }

    /// Digest bytes salted with a 64-bit prefix.
    ///
    /// Distinct salts give independent hash functions over the same input,
    /// which is how per-slot positions and per-index inclusion draws are
    /// derived from one key.
    pub fn salted_digest(salt: u64, bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.to_le_bytes());
        hasher.update(bytes);
        Self::from_bytes(hasher.finalize().into())
    }

    /// Rebuild a fingerprint from its 32-byte representation.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *limb = u64::from_le_bytes(chunk);
        }
        Fingerprint(limbs)
    }

    /// The 32-byte representation, inverse of [`from_bytes`](Self::from_bytes).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, limb) in self.0.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// True for the all-zero fingerprint.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; LIMBS]
    }

    /// Reduce the full 256-bit value modulo `modulus`.
    ///
    /// Limb-wise long division, most significant limb first, so the result
    /// is the remainder of the entire digest rather than of a truncated
    /// prefix.
    pub fn reduce_mod(&self, modulus: u64) -> u64 {
        debug_assert!(modulus > 0, "modulus must be nonzero");
        let mut rem: u64 = 0;
        for &limb in self.0.iter().rev() {
            let wide = (u128::from(rem) << 64) | u128::from(limb);
            rem = (wide % u128::from(modulus)) as u64;
        }
        rem
    }

    /// The most significant 64 bits of the digest.
    ///
    /// Used to draw a uniform value in `[0, 1)` for degree sampling.
    pub fn high_limb(&self) -> u64 {
        self.0[LIMBS - 1]
    }
}

impl BitXor for Fingerprint {
    type Output = Fingerprint;

    fn bitxor(self, rhs: Fingerprint) -> Fingerprint {
        let mut limbs = self.0;
        for (limb, other) in limbs.iter_mut().zip(rhs.0) {
            *limb ^= other;
        }
        Fingerprint(limbs)
    }
}

impl BitXorAssign for Fingerprint {
    fn bitxor_assign(&mut self, rhs: Fingerprint) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}..)", hex::encode(&self.to_bytes()[..4]))
    }
}
