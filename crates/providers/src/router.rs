//! Provider router: builds the configured backends and picks the default.

use crate::image_search::{GoogleImageSearch, UnconfiguredImageSearch};
use crate::openai_compat::OpenAiCompatProvider;
use crate::retry::RetryProvider;
use lappybot_core::image::ImageSearch;
use lappybot_core::provider::Provider;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Named text-generation providers plus the default choice.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Registered provider names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Build every configured provider, making sure the default one exists.
pub fn build_from_config(config: &lappybot_config::AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));

        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, &base_url, &api_key)),
        );
    }

    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let base_url = default_base_url(&config.default_provider);
        router.register(
            config.default_provider.clone(),
            Arc::new(OpenAiCompatProvider::new(
                &config.default_provider,
                &base_url,
                &api_key,
            )),
        );
    }

    router
}

/// The default provider wrapped with the configured retry and timeout policy.
pub fn build_generator(config: &lappybot_config::AppConfig) -> Option<Arc<dyn Provider>> {
    let inner = build_from_config(config).default()?;
    info!(
        provider = %inner.name(),
        model = %config.generation_model(),
        attempts = config.generation.max_attempts,
        "Generation provider ready"
    );
    Some(Arc::new(
        RetryProvider::new(inner)
            .with_attempts(config.generation.max_attempts)
            .with_timeout(Duration::from_secs(config.generation.timeout_secs)),
    ))
}

/// Google image search when credentials are configured, otherwise a
/// stand-in that always reports "not configured".
pub fn build_image_search(config: &lappybot_config::AppConfig) -> Arc<dyn ImageSearch> {
    let settings = &config.image_search;
    match (&settings.api_key, &settings.engine_id) {
        (Some(key), Some(engine)) => Arc::new(GoogleImageSearch::with_endpoint(
            &settings.endpoint,
            key,
            engine,
        )),
        _ => Arc::new(UnconfiguredImageSearch),
    }
}

/// Default base URL for well-known OpenAI-compatible providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
