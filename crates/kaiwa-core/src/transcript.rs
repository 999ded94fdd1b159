//! Conversation transcript files.
//!
//! Transcripts are TOML documents holding the turns of one practice
//! conversation plus the evaluation context (topic, target level, register):
//!
//! ```toml
//! id = "restaurant-1"
//! name = "Ordering food"
//! topic = "food"
//! target_level = "N4"
//! context = "casual"
//!
//! [[messages]]
//! role = "assistant"
//! content = "何を食べたいですか"
//!
//! [[messages]]
//! role = "user"
//! content = "ラーメンが食べたいです"
//! response_time_ms = 6500
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{JlptLevel, Message, Role, SpeechContext};

/// One practice conversation loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique identifier for this conversation.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Conversation topic, passed to the chat provider.
    #[serde(default)]
    pub topic: Option<String>,
    /// Level the learner is studying toward.
    #[serde(default)]
    pub target_level: Option<JlptLevel>,
    /// Register context for honorific analysis.
    #[serde(default)]
    pub context: Option<SpeechContext>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Transcript {
    /// The user-authored turns.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::User)
    }
}

/// Parse a transcript from a TOML file.
pub fn parse_transcript(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript: {}", path.display()))?;
    let transcript: Transcript = toml::from_str(&content)
        .with_context(|| format!("failed to parse transcript: {}", path.display()))?;
    Ok(transcript)
}

/// Load every `.toml` transcript in a directory, sorted by file name.
/// Unparseable files are skipped with a warning.
pub fn load_transcript_directory(dir: &Path) -> Result<Vec<Transcript>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut transcripts = Vec::new();
    for path in &paths {
        match parse_transcript(path) {
            Ok(t) => transcripts.push(t),
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
            }
        }
    }
    Ok(transcripts)
}

/// A non-fatal problem found in a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Index of the offending message, if the warning is message-specific.
    pub message_index: Option<usize>,
    pub message: String,
}

impl ValidationWarning {
    fn transcript(message: impl Into<String>) -> Self {
        Self {
            message_index: None,
            message: message.into(),
        }
    }

    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            message_index: Some(index),
            message: message.into(),
        }
    }
}

/// Check a transcript for conditions that degrade evaluation quality.
///
/// None of these are errors — the pipeline handles them all — but callers
/// probably want to know.
pub fn validate_transcript(transcript: &Transcript) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if transcript.id.trim().is_empty() {
        warnings.push(ValidationWarning::transcript("transcript id is empty"));
    }
    if transcript.messages.is_empty() {
        warnings.push(ValidationWarning::transcript("transcript has no messages"));
        return warnings;
    }

    let user_count = transcript.user_messages().count();
    if user_count == 0 {
        warnings.push(ValidationWarning::transcript(
            "no user messages; the composite score will be all zeros",
        ));
    } else if transcript
        .user_messages()
        .all(|m| m.response_time_ms.is_none())
    {
        warnings.push(ValidationWarning::transcript(
            "no user message records a response time; fluency will use the default score",
        ));
    }

    for (index, message) in transcript.messages.iter().enumerate() {
        if message.content.trim().is_empty() {
            warnings.push(ValidationWarning::at(index, "message content is empty"));
        }
    }

    warnings
}

/// Warnings that only make sense across a set of transcripts, currently
/// duplicate ids.
pub fn validate_transcript_set(transcripts: &[Transcript]) -> Vec<ValidationWarning> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut warnings = Vec::new();
    for t in transcripts {
        let count = counts.entry(t.id.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            warnings.push(ValidationWarning::transcript(format!(
                "duplicate transcript id: {}",
                t.id
            )));
        }
    }
    warnings
}
