//! Conversation-level score aggregation and weakness identification.
//!
//! Combines per-message skill readings into one composite score via
//! averaging, computes the fluency sub-score from response latency, and
//! thresholds the result into a weakness list.

use crate::error::CoreError;
use crate::model::{CompositeScore, Message, Role, ScoringWeights, Skill, SkillAnalysis};

/// Sub-scores below this are flagged as weaknesses by default.
pub const DEFAULT_WEAKNESS_THRESHOLD: u32 = 70;

/// Fluency sub-score used when no message carries a recorded latency.
const DEFAULT_FLUENCY_SCORE: f64 = 70.0;

/// Map an average response latency in seconds onto the 0-100 composite
/// scale.
///
/// This table is independent of the standalone analyzer's 0-10 mapping in
/// `crate::analyzers::fluency`; the two are deliberately not unified.
pub fn fluency_bucket(avg_secs: f64) -> f64 {
    if avg_secs < 5.0 {
        100.0
    } else if avg_secs < 10.0 {
        90.0
    } else if avg_secs < 20.0 {
        80.0
    } else if avg_secs < 30.0 {
        70.0
    } else if avg_secs < 45.0 {
        60.0
    } else {
        50.0
    }
}

/// Combine per-message analyses into one conversation-level composite score.
///
/// Only user-authored messages carrying an analysis qualify; with none, the
/// result is the all-zero composite (not an error). Grammar, vocabulary, and
/// naturalness sub-scores are the means of the stored 0-10 readings scaled
/// onto the 0-100 composite scale; unparseable stored scores count as 0.
/// The weighted total is computed from the unrounded sub-scores and rounded
/// once.
pub fn aggregate(
    messages: &[Message],
    weights: &ScoringWeights,
) -> Result<CompositeScore, CoreError> {
    weights.validate()?;

    let units: Vec<(&Message, &SkillAnalysis)> = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .filter_map(|m| m.analysis.as_ref().map(|a| (m, a)))
        .collect();

    if units.is_empty() {
        return Ok(CompositeScore::default());
    }

    let grammar = mean(units.iter().map(|(_, a)| a.grammar.score.as_f64())) * 10.0;
    let vocabulary = mean(units.iter().map(|(_, a)| a.vocabulary.score.as_f64())) * 10.0;
    let naturalness = mean(units.iter().map(|(_, a)| a.naturalness.score.as_f64())) * 10.0;
    let fluency = fluency_sub_score(&units);

    // Stored readings can come from outside the analyzers; clamp so the
    // composite never leaves its scale.
    let grammar = grammar.clamp(0.0, 100.0);
    let vocabulary = vocabulary.clamp(0.0, 100.0);
    let naturalness = naturalness.clamp(0.0, 100.0);

    let total = grammar * weights.grammar
        + vocabulary * weights.vocabulary
        + fluency * weights.fluency
        + naturalness * weights.naturalness;

    Ok(CompositeScore {
        grammar: grammar.round() as u32,
        vocabulary: vocabulary.round() as u32,
        fluency: fluency.round() as u32,
        naturalness: naturalness.round() as u32,
        total: total.clamp(0.0, 100.0).round() as u32,
    })
}

fn fluency_sub_score(units: &[(&Message, &SkillAnalysis)]) -> f64 {
    let latencies: Vec<f64> = units
        .iter()
        .filter_map(|(m, _)| m.response_time_ms.map(|ms| ms as f64))
        .collect();

    if latencies.is_empty() {
        return DEFAULT_FLUENCY_SCORE;
    }

    let avg_ms = latencies.iter().sum::<f64>() / latencies.len() as f64;
    fluency_bucket(avg_ms / 1000.0)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Skills whose sub-score is strictly below the threshold, in the fixed
/// order grammar, vocabulary, fluency, naturalness.
pub fn identify_weaknesses(
    score: &CompositeScore,
    threshold: u32,
) -> Result<Vec<Skill>, CoreError> {
    if threshold > 100 {
        return Err(CoreError::ThresholdOutOfRange(threshold));
    }
    Ok(Skill::ALL
        .into_iter()
        .filter(|&skill| score.sub_score(skill) < threshold)
        .collect())
}
