//! Grammar analyzer.
//!
//! Substring-based checks for polite form usage and doubled-particle typos.

use serde::{Deserialize, Serialize};

use crate::model::JlptLevel;
use crate::patterns::{DOUBLED_PARTICLE_ERRORS, POLITE_MARKERS};

use super::finalize_score;

const BASELINE_SCORE: f64 = 7.0;

/// Result of grammar analysis for one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarResult {
    /// Score in [0.0, 10.0], one decimal.
    pub score: f64,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
    /// The level hint the analysis was performed against.
    pub level: Option<JlptLevel>,
}

/// Analyze grammar in one text unit.
pub fn analyze(text: &str, level: Option<JlptLevel>) -> GrammarResult {
    let text = text.trim();
    if text.is_empty() {
        return GrammarResult {
            score: 0.0,
            errors: Vec::new(),
            suggestions: Vec::new(),
            level,
        };
    }

    let mut errors = Vec::new();
    let mut suggestions = Vec::new();
    let mut score = BASELINE_SCORE;

    if POLITE_MARKERS.iter().any(|m| text.contains(m)) {
        score += 1.0;
    } else if level.is_some_and(JlptLevel::is_beginner) {
        suggestions.push("Consider using です/ます form for polite speech".to_string());
    }

    if DOUBLED_PARTICLE_ERRORS.iter().any(|e| text.contains(e)) {
        errors.push("Double particle detected".to_string());
        score -= 2.0;
    }

    GrammarResult {
        score: finalize_score(score),
        errors,
        suggestions,
        level,
    }
}
