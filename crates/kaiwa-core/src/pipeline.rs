//! The evaluation pipeline.
//!
//! Ties the analyzers, estimator, and aggregator together: each user turn is
//! analyzed independently and annotated, the estimator runs once over the
//! concatenated user text, and the aggregator produces the composite score
//! and weakness list.

use serde::{Deserialize, Serialize};

use crate::analyzers::{grammar, keigo, particle, vocabulary};
use crate::error::CoreError;
use crate::estimator::{self, LevelEstimate};
use crate::model::{
    CompositeScore, JlptLevel, Message, Role, ScoringWeights, Skill, SkillAnalysis, SkillReading,
    SpeechContext,
};
use crate::scoring::{self, DEFAULT_WEAKNESS_THRESHOLD};

/// Options for one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOptions {
    pub weights: ScoringWeights,
    /// Sub-scores strictly below this are reported as weaknesses.
    pub weakness_threshold: u32,
    /// Level the learner is studying toward; feeds analyzer hints and
    /// `matches_target`.
    pub target_level: Option<JlptLevel>,
    /// Register context for the honorific analyzer.
    pub context: Option<SpeechContext>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            weakness_threshold: DEFAULT_WEAKNESS_THRESHOLD,
            target_level: None,
            context: None,
        }
    }
}

/// Everything one evaluation produces. Owned by the caller; the core keeps
/// no state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub composite: CompositeScore,
    pub estimate: LevelEstimate,
    pub weaknesses: Vec<Skill>,
}

/// Run the four text analyzers on one turn and pack the readings.
///
/// The register/keigo reading is stored as the naturalness skill.
pub fn analyze_message(
    text: &str,
    level: Option<JlptLevel>,
    context: Option<SpeechContext>,
) -> SkillAnalysis {
    let grammar = grammar::analyze(text, level);
    let vocabulary = vocabulary::analyze(text, level);
    let particles = particle::analyze(text);
    let register = keigo::analyze(text, context);

    SkillAnalysis {
        grammar: SkillReading::new(grammar.score, grammar.errors, grammar.suggestions),
        vocabulary: SkillReading::new(vocabulary.score, Vec::new(), vocabulary.suggestions),
        particles: SkillReading::new(particles.score, particles.errors, particles.suggestions),
        naturalness: SkillReading::new(register.score, register.errors, register.suggestions),
    }
}

/// Evaluate a conversation in place.
///
/// Every user turn is re-analyzed (any prior analysis is replaced
/// wholesale), then the level estimate, composite score, and weaknesses are
/// computed over the annotated turns.
pub fn evaluate(
    messages: &mut [Message],
    options: &EvaluateOptions,
) -> Result<Evaluation, CoreError> {
    for message in messages.iter_mut() {
        if message.role == Role::User {
            message.analysis = Some(analyze_message(
                &message.content,
                options.target_level,
                options.context,
            ));
        }
    }

    let user_text = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let estimate = estimator::estimate(&user_text, options.target_level);
    let composite = scoring::aggregate(messages, &options.weights)?;
    let weaknesses = scoring::identify_weaknesses(&composite, options.weakness_threshold)?;

    Ok(Evaluation {
        composite,
        estimate,
        weaknesses,
    })
}
