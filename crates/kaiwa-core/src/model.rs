//! Core data model types for kaiwa.
//!
//! These are the fundamental types the entire kaiwa system uses to represent
//! conversation turns, per-turn skill analyses, and aggregated scores.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// JLPT proficiency levels, ordered weakest (N5) to strongest (N1).
///
/// This is the single tier ladder shared by the analyzers' level hints, the
/// level estimator, and prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    /// All levels, weakest to strongest.
    pub const LADDER: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    /// Iterate the ladder strongest to weakest (tie-break order).
    pub fn strongest_first() -> impl Iterator<Item = JlptLevel> {
        Self::LADDER.iter().rev().copied()
    }

    /// The two beginner levels (N5/N4).
    pub fn is_beginner(self) -> bool {
        matches!(self, JlptLevel::N5 | JlptLevel::N4)
    }

    /// The two advanced levels (N2/N1).
    pub fn is_advanced(self) -> bool {
        matches!(self, JlptLevel::N2 | JlptLevel::N1)
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JlptLevel::N5 => write!(f, "N5"),
            JlptLevel::N4 => write!(f, "N4"),
            JlptLevel::N3 => write!(f, "N3"),
            JlptLevel::N2 => write!(f, "N2"),
            JlptLevel::N1 => write!(f, "N1"),
        }
    }
}

impl FromStr for JlptLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N5" => Ok(JlptLevel::N5),
            "N4" => Ok(JlptLevel::N4),
            "N3" => Ok(JlptLevel::N3),
            "N2" => Ok(JlptLevel::N2),
            "N1" => Ok(JlptLevel::N1),
            other => Err(CoreError::UnknownLevel(other.to_string())),
        }
    }
}

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// Register context for honorific analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechContext {
    Formal,
    Casual,
}

impl FromStr for SpeechContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(SpeechContext::Formal),
            "casual" => Ok(SpeechContext::Casual),
            other => Err(format!("unknown speech context: {other}")),
        }
    }
}

/// One conversation turn.
///
/// Immutable after creation except for the attached analysis, which is
/// replaced wholesale on re-analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Turn author.
    pub role: Role,
    /// The turn text.
    pub content: String,
    /// When the turn was submitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Time from prompt to submission, in milliseconds.
    #[serde(default)]
    pub response_time_ms: Option<u64>,
    /// Per-skill analysis attached by the pipeline.
    #[serde(default)]
    pub analysis: Option<SkillAnalysis>,
}

impl Message {
    /// A user turn with no timestamp or latency.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: None,
            response_time_ms: None,
            analysis: None,
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: None,
            response_time_ms: None,
            analysis: None,
        }
    }
}

/// A persisted score value.
///
/// Analyses can also be produced by an external provider, which may return
/// scores as strings. `as_f64` coerces defensively: numbers pass through,
/// numeric strings are parsed, anything else becomes 0.0 so aggregation
/// never raises on a malformed stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredScore(serde_json::Value);

impl StoredScore {
    pub fn as_f64(&self) -> f64 {
        match &self.0 {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
            serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

impl From<f64> for StoredScore {
    fn from(value: f64) -> Self {
        StoredScore(serde_json::json!(value))
    }
}

impl From<serde_json::Value> for StoredScore {
    fn from(value: serde_json::Value) -> Self {
        StoredScore(value)
    }
}

impl Default for StoredScore {
    fn default() -> Self {
        StoredScore(serde_json::json!(0.0))
    }
}

/// One skill's stored reading on a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillReading {
    /// Score on the 0-10 analyzer scale, one decimal.
    #[serde(default)]
    pub score: StoredScore,
    /// Detected errors, free text.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Improvement suggestions, free text.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl SkillReading {
    pub fn new(score: f64, errors: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            score: score.into(),
            errors,
            suggestions,
        }
    }
}

/// Per-skill analysis attached to one message. Created once per turn at
/// analysis time; re-analysis replaces the whole struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub grammar: SkillReading,
    pub vocabulary: SkillReading,
    pub particles: SkillReading,
    /// Register/honorific reading, aggregated as the naturalness sub-score.
    pub naturalness: SkillReading,
}

/// Weights for combining skill sub-scores into the composite total.
///
/// Configuration contract: each weight must be in [0.0, 1.0] (validated),
/// and the four weights are expected to sum to 1.0. The sum is NOT enforced;
/// keeping it at 1.0 is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub grammar: f64,
    pub vocabulary: f64,
    pub fluency: f64,
    pub naturalness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            grammar: 0.3,
            vocabulary: 0.3,
            fluency: 0.2,
            naturalness: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Reject weights outside [0.0, 1.0].
    pub fn validate(&self) -> Result<(), CoreError> {
        for (skill, value) in [
            ("grammar", self.grammar),
            ("vocabulary", self.vocabulary),
            ("fluency", self.fluency),
            ("naturalness", self.naturalness),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(CoreError::WeightOutOfRange { skill, value });
            }
        }
        Ok(())
    }
}

/// Conversation-level skill scores on the 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub grammar: u32,
    pub vocabulary: u32,
    pub fluency: u32,
    pub naturalness: u32,
    /// Weighted total, computed from unrounded sub-scores then rounded once.
    pub total: u32,
}

impl CompositeScore {
    /// Sub-score for one skill.
    pub fn sub_score(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Grammar => self.grammar,
            Skill::Vocabulary => self.vocabulary,
            Skill::Fluency => self.fluency,
            Skill::Naturalness => self.naturalness,
        }
    }
}

/// The four aggregated skill categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Grammar,
    Vocabulary,
    Fluency,
    Naturalness,
}

impl Skill {
    /// Fixed reporting order: grammar, vocabulary, fluency, naturalness.
    pub const ALL: [Skill; 4] = [
        Skill::Grammar,
        Skill::Vocabulary,
        Skill::Fluency,
        Skill::Naturalness,
    ];
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skill::Grammar => write!(f, "grammar"),
            Skill::Vocabulary => write!(f, "vocabulary"),
            Skill::Fluency => write!(f, "fluency"),
            Skill::Naturalness => write!(f, "naturalness"),
        }
    }
}
