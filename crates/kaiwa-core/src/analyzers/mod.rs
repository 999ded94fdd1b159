//! Per-skill text analyzers.
//!
//! Each analyzer is a stateless pure function of its input: one text unit
//! (plus an optional level or register hint) in, a bounded score plus
//! structured findings out. Trimmed-empty text yields a deterministic
//! zero-result, never an error. All scores are clamped to [0.0, 10.0] and
//! reported with one decimal of precision.

pub mod fluency;
pub mod grammar;
pub mod keigo;
pub mod particle;
pub mod vocabulary;

/// Clamp to the analyzer score range and round to one decimal.
pub(crate) fn finalize_score(score: f64) -> f64 {
    round1(score.clamp(0.0, 10.0))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_clamps_and_rounds() {
        assert_eq!(finalize_score(11.2), 10.0);
        assert_eq!(finalize_score(-3.0), 0.0);
        assert_eq!(finalize_score(7.25), 7.3);
        assert_eq!(round2(0.666), 0.67);
    }
}
