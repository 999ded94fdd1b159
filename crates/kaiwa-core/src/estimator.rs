//! JLPT level estimation.
//!
//! Scores the text against each level's pattern tables, applies global
//! surface-statistic adjustments, and picks the best-matching level with a
//! confidence value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzers::round2;
use crate::model::JlptLevel;
use crate::patterns::{grammar_patterns, kanji_ratio, vocabulary_indicators};

const GRAMMAR_HIT_POINTS: f64 = 1.0;
const VOCABULARY_HIT_POINTS: f64 = 0.5;
const LONG_TEXT_CHARS: usize = 50;

/// Surface statistics computed once over the whole text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceIndicators {
    /// Text length in characters.
    pub sentence_length: usize,
    /// Kanji fraction, two decimals.
    pub kanji_ratio: f64,
    /// True when the best level accumulated more than two points.
    pub has_complex_grammar: bool,
}

/// The estimator's output: one level, a confidence, and the raw per-level
/// totals that produced it. Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelEstimate {
    pub estimated_level: JlptLevel,
    /// max level score / sum of all level scores, in [0.0, 1.0].
    pub confidence: f64,
    /// Raw hit totals per level.
    pub level_scores: BTreeMap<JlptLevel, f64>,
    /// True iff a target level was supplied and matched.
    pub matches_target: bool,
    pub indicators: SurfaceIndicators,
}

/// Estimate the JLPT level of a text.
///
/// Each level earns 1 point per grammar pattern present and 0.5 per
/// vocabulary indicator present (simple presence, no overlap counting).
/// Ties prefer the strongest level. All-zero totals default to N5 with
/// confidence 0.0.
pub fn estimate(text: &str, target: Option<JlptLevel>) -> LevelEstimate {
    let text = text.trim();

    let mut scores: BTreeMap<JlptLevel, f64> =
        JlptLevel::LADDER.iter().map(|&l| (l, 0.0)).collect();

    let mut indicators = SurfaceIndicators::default();

    if !text.is_empty() {
        for &level in &JlptLevel::LADDER {
            let mut total = 0.0;
            for pattern in grammar_patterns(level) {
                if text.contains(pattern) {
                    total += GRAMMAR_HIT_POINTS;
                }
            }
            for word in vocabulary_indicators(level) {
                if text.contains(word) {
                    total += VOCABULARY_HIT_POINTS;
                }
            }
            scores.insert(level, total);
        }

        // Global surface adjustments, applied once rather than per level.
        let length = text.chars().count();
        let ratio = kanji_ratio(text);

        if length > LONG_TEXT_CHARS {
            bump(&mut scores, JlptLevel::N3, 1.0);
            bump(&mut scores, JlptLevel::N2, 1.0);
        }
        if ratio > 0.3 {
            bump(&mut scores, JlptLevel::N2, 1.0);
            bump(&mut scores, JlptLevel::N1, 1.0);
        }
        if ratio > 0.5 {
            bump(&mut scores, JlptLevel::N1, 2.0);
        }

        indicators.sentence_length = length;
        indicators.kanji_ratio = round2(ratio);
    }

    let max_score = scores.values().copied().fold(0.0, f64::max);
    let total_score: f64 = scores.values().sum();

    // Ties break toward the strongest level.
    let estimated_level = if max_score > 0.0 {
        JlptLevel::strongest_first()
            .find(|l| scores.get(l).copied().unwrap_or(0.0) == max_score)
            .unwrap_or(JlptLevel::N5)
    } else {
        JlptLevel::N5
    };

    let confidence = if total_score > 0.0 {
        round2((max_score / total_score).min(1.0))
    } else {
        0.0
    };

    indicators.has_complex_grammar = max_score > 2.0;

    LevelEstimate {
        estimated_level,
        confidence,
        level_scores: scores,
        matches_target: target.is_some_and(|t| t == estimated_level),
        indicators,
    }
}

fn bump(scores: &mut BTreeMap<JlptLevel, f64>, level: JlptLevel, points: f64) {
    if let Some(entry) = scores.get_mut(&level) {
        *entry += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_defaults_to_weakest_level() {
        let estimate = estimate("", None);
        assert_eq!(estimate.estimated_level, JlptLevel::N5);
        assert_eq!(estimate.confidence, 0.0);
        assert!(estimate.level_scores.values().all(|&s| s == 0.0));
        assert!(!estimate.matches_target);
    }

    #[test]
    fn no_pattern_hits_defaults_to_weakest_level() {
        // Latin text matches nothing in any table.
        let estimate = estimate("hello world", None);
        assert_eq!(estimate.estimated_level, JlptLevel::N5);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn beginner_sentence_estimates_n5() {
        let estimate = estimate("私はりんごを食べる", Some(JlptLevel::N5));
        assert_eq!(estimate.estimated_level, JlptLevel::N5);
        assert!(estimate.matches_target);
        assert!(estimate.confidence > 0.0);
    }

    #[test]
    fn advanced_grammar_pattern_raises_level() {
        let estimate = estimate("雨をものともせず、試合を続けた", None);
        let n1 = estimate.level_scores[&JlptLevel::N1];
        assert!(n1 >= 1.0, "expected an N1 grammar hit, got {n1}");
    }

    #[test]
    fn ties_prefer_the_strongest_level() {
        // に限らず is the only N2 pattern here; に/を also give N5 hits, so
        // craft totals directly: both patterns present once each.
        let estimate = estimate("学生に限らず", None);
        let scores = &estimate.level_scores;
        // Whatever the exact totals, the chosen level must carry the max,
        // and no strictly stronger level may share it.
        let max = scores.values().copied().fold(0.0, f64::max);
        assert_eq!(scores[&estimate.estimated_level], max);
        for level in JlptLevel::strongest_first() {
            if level > estimate.estimated_level {
                assert!(scores[&level] < max);
            }
        }
    }

    #[test]
    fn tie_break_is_deterministic_toward_strongest() {
        // ところ (N3) and 準備 (N4 vocab, 0.5) vs a clean N3/N4 tie is hard
        // to force through real text, so check the invariant over a mixed
        // sample instead: estimated level is always the strongest among the
        // maxima.
        let estimate = estimate("準備するところだ", None);
        let max = estimate
            .level_scores
            .values()
            .copied()
            .fold(0.0, f64::max);
        let strongest_at_max = JlptLevel::strongest_first()
            .find(|l| estimate.level_scores[l] == max)
            .unwrap();
        assert_eq!(estimate.estimated_level, strongest_at_max);
    }

    #[test]
    fn long_text_bumps_middle_levels() {
        let filler = "あいうえおかきくけこ".repeat(6); // 60 chars, no pattern hits
        let estimate = estimate(&filler, None);
        assert_eq!(estimate.level_scores[&JlptLevel::N3], 1.0);
        assert_eq!(estimate.level_scores[&JlptLevel::N2], 1.0);
        assert_eq!(estimate.level_scores[&JlptLevel::N1], 0.0);
        assert_eq!(estimate.estimated_level, JlptLevel::N2);
    }

    #[test]
    fn dense_kanji_bumps_upper_levels() {
        // All-kanji text: ratio 1.0 → +1 to N2, +1+2 to N1.
        let estimate = estimate("経済状況調査", None);
        assert_eq!(estimate.level_scores[&JlptLevel::N1], 3.0);
        assert_eq!(estimate.level_scores[&JlptLevel::N2], 1.0);
        assert_eq!(estimate.estimated_level, JlptLevel::N1);
        assert!(estimate.indicators.has_complex_grammar);
    }

    #[test]
    fn confidence_is_clamped_and_rounded() {
        let estimate = estimate("私は学生です。準備について説明します。", None);
        assert!(estimate.confidence > 0.0);
        assert!(estimate.confidence <= 1.0);
        let scaled = estimate.confidence * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn matches_target_false_without_target() {
        let estimate = estimate("私は学生です", None);
        assert!(!estimate.matches_target);
    }

    #[test]
    fn indicators_report_length_and_ratio() {
        let estimate = estimate("日本語です", None);
        assert_eq!(estimate.indicators.sentence_length, 5);
        assert_eq!(estimate.indicators.kanji_ratio, 0.6);
    }
}
