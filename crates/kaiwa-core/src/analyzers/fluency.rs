//! Fluency analyzer.
//!
//! A pure function of response latency; the text itself is not inspected.
//! This standalone 0-10 mapping and the aggregator's 0-100 latency table in
//! `crate::scoring` are two independently defined mappings over the same
//! input and are deliberately not unified.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::round2;

/// Qualitative fluency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluencyLevel {
    Excellent,
    VeryGood,
    Good,
    Medium,
    NeedsImprovement,
    Slow,
}

impl fmt::Display for FluencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluencyLevel::Excellent => write!(f, "excellent"),
            FluencyLevel::VeryGood => write!(f, "very_good"),
            FluencyLevel::Good => write!(f, "good"),
            FluencyLevel::Medium => write!(f, "medium"),
            FluencyLevel::NeedsImprovement => write!(f, "needs_improvement"),
            FluencyLevel::Slow => write!(f, "slow"),
        }
    }
}

/// Result of fluency analysis for one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluencyResult {
    /// Score in [5.0, 10.0] when latency is known, 7.0 when missing.
    pub score: f64,
    pub level: FluencyLevel,
    /// The latency in seconds, two decimals. `None` when not recorded.
    pub response_time_s: Option<f64>,
    pub suggestions: Vec<String>,
}

/// Analyze fluency from response latency.
///
/// `sentence_length` (in characters) is optional and only feeds the
/// pacing suggestion.
pub fn analyze(response_time_ms: Option<u64>, sentence_length: Option<usize>) -> FluencyResult {
    let Some(ms) = response_time_ms else {
        return FluencyResult {
            score: 7.0,
            level: FluencyLevel::Medium,
            response_time_s: None,
            suggestions: Vec::new(),
        };
    };

    let secs = ms as f64 / 1000.0;
    let (score, level) = if secs < 5.0 {
        (10.0, FluencyLevel::Excellent)
    } else if secs < 10.0 {
        (9.0, FluencyLevel::VeryGood)
    } else if secs < 20.0 {
        (8.0, FluencyLevel::Good)
    } else if secs < 30.0 {
        (7.0, FluencyLevel::Medium)
    } else if secs < 45.0 {
        (6.0, FluencyLevel::NeedsImprovement)
    } else {
        (5.0, FluencyLevel::Slow)
    };

    let mut suggestions = Vec::new();
    if secs > 30.0 {
        suggestions.push("Try to respond more quickly to improve fluency".to_string());
    }
    if let Some(len) = sentence_length {
        if len > 0 && secs / len as f64 > 2.0 {
            suggestions.push("Practice speaking shorter sentences first".to_string());
        }
    }

    FluencyResult {
        score,
        level,
        response_time_s: Some(round2(secs)),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_latency_defaults_to_medium() {
        let result = analyze(None, Some(20));
        assert_eq!(result.score, 7.0);
        assert_eq!(result.level, FluencyLevel::Medium);
        assert!(result.response_time_s.is_none());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn bucket_boundaries_are_exclusive_upper() {
        assert_eq!(analyze(Some(4_999), None).score, 10.0);
        assert_eq!(analyze(Some(5_000), None).score, 9.0);
        assert_eq!(analyze(Some(9_999), None).score, 9.0);
        assert_eq!(analyze(Some(19_999), None).score, 8.0);
        assert_eq!(analyze(Some(29_999), None).score, 7.0);
        assert_eq!(analyze(Some(44_999), None).score, 6.0);
        assert_eq!(analyze(Some(45_000), None).score, 5.0);
        assert_eq!(analyze(Some(600_000), None).score, 5.0);
    }

    #[test]
    fn slow_response_suggests_speed() {
        let result = analyze(Some(40_000), None);
        assert_eq!(result.level, FluencyLevel::NeedsImprovement);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn very_slow_short_sentence_suggests_pacing() {
        // 50s for a 10-char sentence: 5 s/char.
        let result = analyze(Some(50_000), Some(10));
        assert_eq!(result.level, FluencyLevel::Slow);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("shorter sentences")));
    }

    #[test]
    fn reports_latency_in_seconds() {
        let result = analyze(Some(12_345), None);
        assert_eq!(result.response_time_s, Some(12.35));
    }
}
