//! Error types for timecode operations.

use thiserror::Error;

use crate::rate::Rate;

/// Main error type for rate and timecode operations.
///
/// Every variant is an input-validation failure; no operation hands back a
/// partially built value alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    #[error("rate must be at least 1 fps with a representable 24 hour frame count but got: {0}")]
    InvalidRate(f64),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("out of range: {0}")]
    Range(String),

    #[error("resulting timecode would have a negative value: {frames} - {subtrahend}")]
    NegativeResult { frames: u64, subtrahend: u64 },

    #[error("rate mismatch: {left} vs {right}")]
    RateMismatch { left: Rate, right: Rate },
}

/// Result type alias for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;
