//! Image lookup trait. Finds a picture of a laptop model.
//!
//! Used only by the chat agent's image request path.

use crate::error::ProviderError;
use async_trait::async_trait;

#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// A human-readable name for this backend (e.g., "google-cse").
    fn name(&self) -> &str;

    /// Return the URL of the first image hit for `query`, or `None` when the
    /// search succeeded but found nothing.
    async fn first_image(&self, query: &str) -> std::result::Result<Option<String>, ProviderError>;
}
