//! Xorset core - algebraic foundations for XOR set reconciliation
//!
//! Pure, synchronous building blocks shared by the sketch encodings:
//! fingerprints with XOR and full-width modulo arithmetic, coded symbols,
//! session-scoped reverse lookup tables, and the unified error type. No
//! encoding logic lives here; the `xorset-sketch` crate builds the bounded
//! and rateless structures on top of this algebra.

#![forbid(unsafe_code)]

/// Key/value entries exchanged through reconciliation
pub mod entry;

/// Unified error handling
pub mod errors;

/// 256-bit fingerprints and their arithmetic
pub mod fingerprint;

/// Reverse fingerprint-to-bytes lookup
pub mod lookup;

/// XOR accumulators with signed counts
pub mod symbol;

pub use entry::Entry;
pub use errors::{Result, SketchError};
pub use fingerprint::Fingerprint;
pub use lookup::ReverseTable;
pub use symbol::CodedSymbol;
