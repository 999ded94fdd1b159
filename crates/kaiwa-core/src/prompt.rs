//! System prompt construction for conversation practice.

use crate::model::JlptLevel;

/// What a conversation partner should stick to at each level.
pub fn level_guideline(level: JlptLevel) -> &'static str {
    match level {
        JlptLevel::N5 => "basic sentences, present/past tense, common vocabulary (〜です、〜ます)",
        JlptLevel::N4 => "simple conversations, te-form, basic particles (〜て、〜から、〜ので)",
        JlptLevel::N3 => "everyday topics, conditional forms, intermediate vocabulary (〜ば、〜たら)",
        JlptLevel::N2 => "abstract topics, basic keigo, news-level vocabulary (尊敬語、謙譲語)",
        JlptLevel::N1 => "complex discussion, advanced keigo, academic vocabulary",
    }
}

/// Build the system prompt for a practice conversation.
pub fn build_system_prompt(topic: &str, level: JlptLevel) -> String {
    format!(
        "You are a friendly Japanese conversation partner helping a learner \
         practice for the JLPT {level} exam.\n\
         Topic: {topic}\n\
         Stay within the learner's level: {guideline}.\n\
         Respond only in Japanese, keep replies to one or two sentences, and \
         end with a question that invites the learner to continue.",
        guideline = level_guideline(level),
    )
}
