//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use kaiwa_core::traits::{ChatProvider, ChatReply, ChatRequest};

/// A mock chat provider for testing the conversation loop without real API
/// calls.
///
/// Returns configurable replies based on the latest user turn; the default
/// reply echoes the topic back as a question.
pub struct MockProvider {
    /// Map of user-turn substring → reply.
    replies: HashMap<String, String>,
    /// Fixed reply, overriding the topic echo, if set.
    fixed_reply: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with the given turn→reply mappings.
    pub fn new(replies: HashMap<String, String>) -> Self {
        Self {
            replies,
            fixed_reply: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same reply.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self {
            replies: HashMap::new(),
            fixed_reply: Some(reply.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn reply(&self, request: &ChatRequest) -> anyhow::Result<ChatReply> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let latest_turn = request
            .history
            .last()
            .map(|t| t.content.as_str())
            .unwrap_or_default();

        let content = self
            .replies
            .iter()
            .find(|(key, _)| latest_turn.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .or_else(|| self.fixed_reply.clone())
            .unwrap_or_else(|| format!("{}についてどう思いますか。", request.topic));

        Ok(ChatReply {
            content,
            model: request.model.clone(),
            latency_ms: Some(1),
        })
    }
}
