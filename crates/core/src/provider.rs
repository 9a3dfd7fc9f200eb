//! Provider trait: the abstraction over text-generation backends.
//!
//! A Provider knows how to send an ordered list of conversation turns to an
//! LLM and get a complete reply back. Streaming and tool use are not part of
//! this contract.
//!
//! Implementations: OpenAI-compatible endpoints, a retrying wrapper, and
//! scripted providers in tests.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gpt-4-turbo")
    pub model: String,

    /// The conversation messages, system prompt first
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated message
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

impl ProviderResponse {
    /// The reply text without surrounding whitespace.
    pub fn text(&self) -> String {
        self.message.content.trim().to_string()
    }
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The chat agent calls `complete()` without knowing which backend is in use.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Convenience over `complete()` returning only the trimmed reply text.
    async fn generate(&self, request: ProviderRequest) -> std::result::Result<String, ProviderError> {
        Ok(self.complete(request).await?.text())
    }

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PaddedProvider;

    #[async_trait]
    impl Provider for PaddedProvider {
        fn name(&self) -> &str {
            "padded"
        }

        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                message: Message::assistant("  The ASUS ROG suits gaming.\n"),
                usage: None,
                model: request.model,
            })
        }
    }

    #[test]
    fn provider_request_defaults() {
        let req: ProviderRequest = serde_json::from_value(serde_json::json!({
            "model": "gpt-4-turbo",
            "messages": []
        }))
        .unwrap();
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[tokio::test]
    async fn generate_trims_reply() {
        let request = ProviderRequest {
            model: "gpt-4-turbo".into(),
            messages: vec![Message::user("best gaming laptop?")],
            temperature: 0.7,
            max_tokens: Some(1000),
        };
        let text = PaddedProvider.generate(request).await.unwrap();
        assert_eq!(text, "The ASUS ROG suits gaming.");
    }
}
