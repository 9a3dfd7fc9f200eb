//! Google Custom Search image lookup.
//!
//! Asks the Custom Search JSON API for a single image result and returns its
//! link. An empty result set is `Ok(None)`; transport and API failures are
//! errors for the caller to turn into a user-facing message.

use async_trait::async_trait;
use lappybot_core::error::ProviderError;
use lappybot_core::image::ImageSearch;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const GOOGLE_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

pub struct GoogleImageSearch {
    endpoint: String,
    api_key: String,
    engine_id: String,
    client: reqwest::Client,
}

impl GoogleImageSearch {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self::with_endpoint(GOOGLE_CSE_ENDPOINT, api_key, engine_id)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to a default HTTP client");
                reqwest::Client::new()
            });

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

#[async_trait]
impl ImageSearch for GoogleImageSearch {
    fn name(&self) -> &str {
        "google-cse"
    }

    async fn first_image(&self, query: &str) -> Result<Option<String>, ProviderError> {
        debug!(query, "Searching for image");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("cx", self.engine_id.as_str()),
                ("key", self.api_key.as_str()),
                ("searchType", "image"),
                ("num", "1"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Image search returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: body,
            });
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| ProviderError::ApiError {
            status_code: 200,
            message: format!("Failed to parse image search response: {e}"),
        })?;

        Ok(parsed.items.into_iter().next().map(|item| item.link))
    }
}

/// Stand-in used when no image search credentials are configured.
pub struct UnconfiguredImageSearch;

#[async_trait]
impl ImageSearch for UnconfiguredImageSearch {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn first_image(&self, _query: &str) -> Result<Option<String>, ProviderError> {
        Err(ProviderError::NotConfigured(
            "Image search requires an API key and search engine id".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::{Json, Router, routing::get};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/customsearch/v1")
    }

    #[tokio::test]
    async fn returns_first_link_and_sends_expected_params() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["q"], "Dell XPS 15");
                assert_eq!(params["cx"], "engine");
                assert_eq!(params["key"], "secret");
                assert_eq!(params["searchType"], "image");
                assert_eq!(params["num"], "1");
                Json(serde_json::json!({
                    "items": [
                        {"link": "https://img.example.com/xps.jpg"},
                        {"link": "https://img.example.com/other.jpg"}
                    ]
                }))
            }),
        );
        let endpoint = serve(router).await;
        let search = GoogleImageSearch::with_endpoint(endpoint, "secret", "engine");

        let url = search.first_image("Dell XPS 15").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://img.example.com/xps.jpg"));
    }

    #[tokio::test]
    async fn no_items_is_none() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|| async { Json(serde_json::json!({"kind": "customsearch#search"})) }),
        );
        let search = GoogleImageSearch::with_endpoint(serve(router).await, "k", "cx");
        assert_eq!(search.first_image("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn api_failure_is_error() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|| async { (StatusCode::FORBIDDEN, "quota exceeded") }),
        );
        let search = GoogleImageSearch::with_endpoint(serve(router).await, "k", "cx");
        assert!(matches!(
            search.first_image("anything").await,
            Err(ProviderError::ApiError { status_code: 403, .. })
        ));
    }

    #[tokio::test]
    async fn unconfigured_always_errors() {
        let result = UnconfiguredImageSearch.first_image("x").await;
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }
}
