//! Xorset sketch prelude.
//!
//! Curated re-exports for reconciliation callers.

pub use crate::{
    Decoded, FixedConfig, FixedSketch, RatelessConfig, RatelessDifference, RatelessSketch,
    DEFAULT_ALPHA, DEFAULT_HASH_COUNT,
};
pub use xorset_core::{CodedSymbol, Entry, Fingerprint, Result, ReverseTable, SketchError};
