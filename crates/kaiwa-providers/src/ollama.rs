//! Ollama (local LLM) provider implementation.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use kaiwa_core::model::Role;
use kaiwa_core::prompt::build_system_prompt;
use kaiwa_core::traits::{ChatProvider, ChatReply, ChatRequest};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 300; // Local models are slower

/// Ollama local LLM provider.
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: &str) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaResponseMessage,
    model: String,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn reply(&self, request: &ChatRequest) -> anyhow::Result<ChatReply> {
        let start = Instant::now();

        let system_prompt = request
            .system_prompt
            .clone()
            .unwrap_or_else(|| build_system_prompt(&request.topic, request.level));

        let mut messages = vec![OllamaMessage {
            role: "system".to_string(),
            content: system_prompt,
        }];
        for turn in &request.history {
            messages.push(OllamaMessage {
                role: wire_role(turn.role).to_string(),
                content: turn.content.clone(),
            });
        }

        let body = OllamaRequest {
            model: request.model.clone(),
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else if e.is_connect() {
                    ProviderError::NetworkError(format!(
                        "Ollama not reachable at {}. Is it running? Start with: ollama serve",
                        self.base_url
                    ))
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ProviderError::ModelNotFound(format!(
                "Model '{}' not found locally. Pull it with: ollama pull {}",
                request.model, request.model
            ))
            .into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OllamaResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(ChatReply {
            content: api_response.message.content,
            model: api_response.model,
            latency_ms: Some(latency_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiwa_core::model::JlptLevel;
    use kaiwa_core::traits::ChatTurn;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> ChatRequest {
        ChatRequest {
            model: "llama3.1:8b".into(),
            topic: "食べ物".into(),
            level: JlptLevel::N5,
            history: vec![ChatTurn::new(Role::User, "こんにちは")],
            system_prompt: None,
        }
    }

    #[tokio::test]
    async fn successful_reply() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "message": {"role": "assistant", "content": "何が好きですか？"},
            "model": "llama3.1:8b"
        });

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri());
        let reply = provider.reply(&sample_request()).await.unwrap();
        assert_eq!(reply.content, "何が好きですか？");
        assert_eq!(reply.model, "llama3.1:8b");
    }

    #[tokio::test]
    async fn model_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri());
        let mut request = sample_request();
        request.model = "nonexistent".into();

        let err = provider.reply(&request).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let provider = OllamaProvider::new("");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }
}
