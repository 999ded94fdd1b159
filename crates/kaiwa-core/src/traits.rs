//! The chat provider boundary.
//!
//! Conversation partners (hosted APIs, local models, test doubles) implement
//! [`ChatProvider`]; everything above this trait is provider-agnostic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{JlptLevel, Role};

/// One turn of prior conversation sent to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A request for the next assistant turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier, interpreted by the provider.
    pub model: String,
    /// Conversation topic.
    pub topic: String,
    /// Level the reply should be pitched at.
    pub level: JlptLevel,
    /// Prior turns, oldest first. The latest user turn comes last.
    pub history: Vec<ChatTurn>,
    /// Overrides the generated system prompt when set.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// A provider's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    /// Model that actually produced the reply.
    pub model: String,
    /// Provider-side latency in milliseconds, when known.
    pub latency_ms: Option<u64>,
}

/// A conversation partner.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider name for logs and errors.
    fn name(&self) -> &str;

    /// Produce the next assistant turn.
    async fn reply(&self, request: &ChatRequest) -> anyhow::Result<ChatReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_without_system_prompt() {
        let request = ChatRequest {
            model: "gpt-4o-mini".into(),
            topic: "旅行".into(),
            level: JlptLevel::N4,
            history: vec![ChatTurn::new(Role::User, "こんにちは")],
            system_prompt: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: ChatRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, JlptLevel::N4);
        assert_eq!(back.history.len(), 1);
        assert!(back.system_prompt.is_none());
    }
}
