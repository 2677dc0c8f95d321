//! Xorset sketches - XOR set-reconciliation encodings
//!
//! Two encodings over the `xorset-core` algebra plus the decoder they share:
//!
//! - [`FixedSketch`]: a bounded table of coded symbols. Each key lands in
//!   `hash_count` slots chosen by salted hashes. Compact and cheap when a
//!   capacity bound is known up front; decode stalls if the true difference
//!   outgrows the table.
//! - [`RatelessSketch`]: an unbounded, lazily generated symbol stream with a
//!   decreasing per-index inclusion probability. No size pre-agreement is
//!   needed: decode some prefix of the stream and extend it on a stall.
//!   More symbols never lose previously decodable entries.
//! - The peeling decoder: repeatedly resolves pure symbols (net count of
//!   plus or minus one) and cancels their contributions until a fixed point.
//!
//! Reconciliation flow: each side builds a sketch from its set, the two
//! sketches are combined per index (XOR the sums, subtract the counts), and
//! peeling the combination yields the entries exclusive to either side.
//! Reverse lookup tables must be merged before decoding; fingerprints only
//! the peer can resolve are skipped and retried after a merge.
//!
//! ```
//! use xorset_core::ReverseTable;
//! use xorset_sketch::FixedSketch;
//!
//! # fn main() -> xorset_core::Result<()> {
//! let mut table = ReverseTable::new();
//! let mut ours = FixedSketch::new(32, 3)?;
//! let mut theirs = FixedSketch::new(32, 3)?;
//! ours.insert(&mut table, b"shared", b"v");
//! ours.insert(&mut table, b"only-ours", b"v");
//! theirs.insert(&mut table, b"shared", b"v");
//!
//! let mut diff = ours.difference(&theirs)?;
//! let decoded = diff.list_differences(&table);
//! assert!(decoded.complete);
//! assert_eq!(decoded.added.len(), 1);
//! assert_eq!(decoded.added[0].key, b"only-ours");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

/// Sketch runtime configuration
pub mod config;

/// The shared peeling decoder
pub mod decode;

/// The bounded, fixed-size sketch
pub mod fixed;

/// Deterministic key-to-symbol mapping rules
pub mod mapping;

/// Curated re-exports
pub mod prelude;

/// The rateless, on-demand symbol stream
pub mod rateless;

pub use config::{FixedConfig, RatelessConfig, DEFAULT_ALPHA, DEFAULT_HASH_COUNT};
pub use decode::Decoded;
pub use fixed::FixedSketch;
pub use rateless::{RatelessDifference, RatelessSketch};
