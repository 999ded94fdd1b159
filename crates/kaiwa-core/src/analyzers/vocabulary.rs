//! Vocabulary analyzer.
//!
//! Uses the kanji ratio as a complexity proxy: more kanji suggests
//! higher-level vocabulary.

use serde::{Deserialize, Serialize};

use crate::model::JlptLevel;
use crate::patterns::kanji_ratio;

use super::{finalize_score, round2};

const BASELINE_SCORE: f64 = 7.0;

/// Result of vocabulary analysis for one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyResult {
    /// Score in [0.0, 10.0], one decimal.
    pub score: f64,
    /// False when a beginner-level hint shows unexpectedly dense kanji.
    pub level_appropriate: bool,
    /// Kanji fraction of the text, two decimals. Returned for observability.
    pub kanji_ratio: f64,
    pub suggestions: Vec<String>,
}

/// Analyze vocabulary in one text unit.
pub fn analyze(text: &str, level: Option<JlptLevel>) -> VocabularyResult {
    let text = text.trim();
    if text.is_empty() {
        return VocabularyResult {
            score: 0.0,
            level_appropriate: true,
            kanji_ratio: 0.0,
            suggestions: Vec::new(),
        };
    }

    let mut score = BASELINE_SCORE;
    let mut suggestions = Vec::new();
    let ratio = kanji_ratio(text);

    if ratio > 0.3 {
        score += 1.0;
    } else if ratio < 0.1 && level.is_some_and(JlptLevel::is_advanced) {
        suggestions.push("Consider using more kanji for higher level".to_string());
        score -= 1.0;
    }

    let mut level_appropriate = true;
    if level.is_some_and(JlptLevel::is_beginner) && ratio > 0.5 {
        level_appropriate = false;
        suggestions.push("Vocabulary may be too advanced for target level".to_string());
    }

    VocabularyResult {
        score: finalize_score(score),
        level_appropriate,
        kanji_ratio: round2(ratio),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_result() {
        let result = analyze("  ", Some(JlptLevel::N2));
        assert_eq!(result.score, 0.0);
        assert!(result.level_appropriate);
        assert_eq!(result.kanji_ratio, 0.0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn dense_kanji_earns_bonus() {
        // 4 kanji of 6 chars: ratio 0.67
        let result = analyze("経済状況です", None);
        assert_eq!(result.score, 8.0);
        assert_eq!(result.kanji_ratio, 0.67);
    }

    #[test]
    fn sparse_kanji_at_advanced_level_penalized() {
        let result = analyze("これはとてもいいですね", Some(JlptLevel::N1));
        assert_eq!(result.score, 6.0);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.suggestions[0].contains("kanji"));
    }

    #[test]
    fn sparse_kanji_at_beginner_level_not_penalized() {
        let result = analyze("これはとてもいいですね", Some(JlptLevel::N5));
        assert_eq!(result.score, 7.0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn beginner_with_heavy_kanji_flagged() {
        let result = analyze("経済影響調査報告", Some(JlptLevel::N5));
        assert!(!result.level_appropriate);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("too advanced")));
    }

    #[test]
    fn score_stays_in_range() {
        let result = analyze(&"漢".repeat(10_000), Some(JlptLevel::N5));
        assert!((0.0..=10.0).contains(&result.score));
    }
}
