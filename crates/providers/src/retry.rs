//! Bounded retries with a per-attempt timeout.
//!
//! Wraps one provider. Each attempt runs under `tokio::time::timeout`; a
//! timeout counts as a failed attempt. Only the final outcome leaves this
//! wrapper, so callers never observe the failed attempts.

use async_trait::async_trait;
use lappybot_core::error::ProviderError;
use lappybot_core::provider::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A provider that retries its inner provider up to `max_attempts` times.
pub struct RetryProvider {
    inner: Arc<dyn Provider>,
    max_attempts: u32,
    timeout: Duration,
}

impl RetryProvider {
    /// One attempt, 60 second timeout.
    pub fn new(inner: Arc<dyn Provider>) -> Self {
        Self {
            inner,
            max_attempts: 1,
            timeout: Duration::from_secs(60),
        }
    }

    /// Total attempts, including the first. Zero is treated as one.
    pub fn with_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Whether another attempt could plausibly succeed.
fn is_retryable(error: &ProviderError) -> bool {
    !matches!(
        error,
        ProviderError::AuthenticationFailed(_) | ProviderError::NotConfigured(_)
    )
}

#[async_trait]
impl Provider for RetryProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let provider_name = self.inner.name().to_string();
        let mut last_error = ProviderError::NotConfigured("No attempts made".into());

        for attempt in 1..=self.max_attempts {
            debug!(
                provider = %provider_name,
                attempt,
                total = self.max_attempts,
                "Generation attempt"
            );

            match tokio::time::timeout(self.timeout, self.inner.complete(request.clone())).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(e)) => {
                    warn!(
                        provider = %provider_name,
                        attempt,
                        error = %e,
                        "Generation attempt failed"
                    );
                    let retryable = is_retryable(&e);
                    last_error = e;
                    if !retryable {
                        break;
                    }
                }
                Err(_) => {
                    warn!(
                        provider = %provider_name,
                        attempt,
                        timeout_secs = self.timeout.as_secs(),
                        "Generation attempt timed out"
                    );
                    last_error = ProviderError::Timeout(format!(
                        "Provider '{}' timed out after {}s",
                        provider_name,
                        self.timeout.as_secs()
                    ));
                }
            }
        }

        Err(last_error)
    }

    /// The inner provider's check, bounded by the same per-attempt timeout.
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        tokio::time::timeout(self.timeout, self.inner.health_check())
            .await
            .map_err(|_| {
                ProviderError::Timeout(format!(
                    "Provider '{}' health check timed out after {}s",
                    self.inner.name(),
                    self.timeout.as_secs()
                ))
            })?
    }
}
