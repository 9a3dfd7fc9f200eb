//! Shared test doubles for chat tests.

use async_trait::async_trait;
use lappybot_core::error::ProviderError;
use lappybot_core::image::ImageSearch;
use lappybot_core::message::Message;
use lappybot_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns scripted replies in order and records every request.
///
/// Once the script runs out, each call fails with an API error.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new<S: Into<String>>(replies: Vec<S>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(text) => Ok(ProviderResponse {
                message: Message::assistant(text),
                usage: Some(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
                model,
            }),
            None => Err(ProviderError::ApiError {
                status_code: 500,
                message: "script exhausted".into(),
            }),
        }
    }
}

/// Always fails with the given error.
pub struct FailingProvider {
    error: ProviderError,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(self.error.clone())
    }
}

/// Image search with a fixed outcome.
pub struct StaticImageSearch {
    outcome: Result<Option<String>, ProviderError>,
}

impl StaticImageSearch {
    pub fn found(url: &str) -> Self {
        Self {
            outcome: Ok(Some(url.to_string())),
        }
    }

    pub fn empty() -> Self {
        Self { outcome: Ok(None) }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(ProviderError::Network("connection reset".into())),
        }
    }
}

#[async_trait]
impl ImageSearch for StaticImageSearch {
    fn name(&self) -> &str {
        "static"
    }

    async fn first_image(&self, _query: &str) -> Result<Option<String>, ProviderError> {
        self.outcome.clone()
    }
}
