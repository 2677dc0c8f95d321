//! Sketch runtime configuration.

use serde::{Deserialize, Serialize};
use xorset_core::{Result, SketchError};

/// Default number of slots each key is scattered into.
pub const DEFAULT_HASH_COUNT: u32 = 3;

/// Default degree-decay rate for rateless symbol sampling.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Parameters of a fixed-size sketch.
///
/// Both peers must build their tables with identical parameters; combining
/// mismatched tables is rejected before any XOR happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedConfig {
    /// Number of coded symbols in the table
    pub size: usize,
    /// Slots per key; extra slots add per-entry redundancy
    pub hash_count: u32,
}

impl FixedConfig {
    /// A configuration with the default hash count.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }

    /// Reject parameters the sketch algebra cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SketchError::invalid_config("sketch size must be nonzero"));
        }
        if self.hash_count == 0 {
            return Err(SketchError::invalid_config("hash count must be nonzero"));
        }
        Ok(())
    }
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self {
            size: 128,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

/// Parameters of a rateless sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatelessConfig {
    /// Degree-decay rate: inclusion probability for symbol `i` is
    /// `1 / (1 + alpha * i)`. Smaller values keep symbols dense for longer,
    /// larger values taper the mapping probability faster.
    pub alpha: f64,
}

impl RatelessConfig {
    /// Reject decay rates the sampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SketchError::invalid_config(
                "alpha must be a finite positive number",
            ));
        }
        Ok(())
    }
}

impl Default for RatelessConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}
