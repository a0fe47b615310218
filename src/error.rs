//! Configuration errors
//!
//! The simulation itself has no recoverable errors: rejected commands are
//! ignored. Only a malformed tuning table is fatal, and it is reported before
//! the first tick runs.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::Tuning`] table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("range `{name}` is empty or inverted: [{min}, {max})")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("`{name}` must be finite")]
    NonFinite { name: &'static str },

    #[error("factor `{name}` must lie in (0, 1], got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("`{name}` must be a non-zero tick interval")]
    ZeroInterval { name: &'static str },

    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning read error: {0}")]
    Io(#[from] std::io::Error),
}
