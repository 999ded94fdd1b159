//! Core error types.
//!
//! The scoring pipeline never errors on noisy input data (empty text,
//! unparseable stored scores, zero qualifying messages all degrade to
//! conservative defaults). The variants here signal contract violations by
//! the caller, which must surface rather than be absorbed.

use thiserror::Error;

/// Errors raised by the scoring core on caller misuse.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A level string outside the closed N5..N1 ladder.
    #[error("unknown JLPT level: {0}")]
    UnknownLevel(String),

    /// A scoring weight outside [0.0, 1.0].
    #[error("{skill} weight {value} is outside [0.0, 1.0]")]
    WeightOutOfRange { skill: &'static str, value: f64 },

    /// A weakness threshold outside [0, 100].
    #[error("weakness threshold {0} is outside [0, 100]")]
    ThresholdOutOfRange(u32),
}
