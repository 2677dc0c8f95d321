//! Unified error type for sketch construction and combination.
//!
//! Decode shortfalls are deliberately not errors. Capacity exhaustion, an
//! undersized symbol budget, and unresolved fingerprints all surface as a
//! partial result with a completeness flag, because partial recoveries are
//! valid and the caller can retry after re-encoding larger, extending the
//! symbol stream, or merging more lookup mappings. Errors are reserved for
//! invalid inputs that must be rejected before any XOR combination happens:
//! mismatched structural parameters produce meaningless, undetectable
//! garbage, so the contract rejects them at the API boundary.

use serde::{Deserialize, Serialize};

/// Errors surfaced at the sketch API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum SketchError {
    /// Two fixed sketches of different size were combined
    #[error("size mismatch: left sketch has {left} symbols, right has {right}")]
    SizeMismatch {
        /// Symbol count of the left operand
        left: usize,
        /// Symbol count of the right operand
        right: usize,
    },

    /// Two fixed sketches with different hash counts were combined
    #[error("hash count mismatch: left scatters into {left} slots per key, right into {right}")]
    HashCountMismatch {
        /// Hash count of the left operand
        left: u32,
        /// Hash count of the right operand
        right: u32,
    },

    /// Two rateless sketches with different degree-decay rates were combined
    #[error("alpha mismatch: left decays at {left}, right at {right}")]
    AlphaMismatch {
        /// Decay rate of the left operand
        left: f64,
        /// Decay rate of the right operand
        right: f64,
    },

    /// A sketch was configured with unusable parameters
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What made the configuration unusable
        message: String,
    },
}

impl SketchError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Convenience alias used across the sketch crates.
pub type Result<T> = std::result::Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_mismatched_parameters() {
        let err = SketchError::SizeMismatch {
            left: 20,
            right: 40,
        };
        let msg = format!("{err}");
        assert!(msg.contains("20"));
        assert!(msg.contains("40"));
        assert!(msg.contains("size"));
    }

    #[test]
    fn invalid_config_carries_message() {
        let err = SketchError::invalid_config("sketch size must be nonzero");
        assert!(format!("{err}").contains("nonzero"));
    }
}
