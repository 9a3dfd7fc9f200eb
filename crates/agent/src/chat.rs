//! Chat rounds over a session transcript.
//!
//! A message round appends the user turn, composes `[system] + transcript`,
//! asks the provider for a reply, then appends the reply and trims the
//! transcript to its window. When generation fails the user turn stays, no
//! assistant turn is added, and the caller gets a fixed apology.
//!
//! Image requests bypass the transcript entirely.

use crate::markup;
use crate::prompt::PromptComposer;
use crate::session::SessionStore;
use lappybot_catalog::Catalog;
use lappybot_config::AppConfig;
use lappybot_core::image::ImageSearch;
use lappybot_core::message::{Message, SessionId};
use lappybot_core::provider::{Provider, ProviderRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

pub const GENERATION_APOLOGY: &str = "Sorry, I encountered an error while generating a response.";
pub const IMAGE_NOT_FOUND: &str = "No image found";
pub const IMAGE_FETCH_ERROR: &str = "Error fetching image";

const IMAGE_PHRASE: &str = "image for the";

/// What the caller is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestKind {
    /// A free-form question for the assistant
    Message { text: String },
    /// A picture of a laptop model
    Image { query: String },
}

impl RequestKind {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    pub fn image(query: impl Into<String>) -> Self {
        Self::Image {
            query: query.into(),
        }
    }

    /// Classify plain chat text.
    ///
    /// Text mentioning "image" (any case) that also contains the exact phrase
    /// "image for the" is an image request for whatever follows the phrase,
    /// up to any repeat of it. Everything else is a message.
    pub fn from_text(text: &str) -> Self {
        if text.to_lowercase().contains("image") {
            if let Some(query) = text.split(IMAGE_PHRASE).nth(1) {
                return Self::image(query.trim());
            }
        }
        Self::message(text)
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub session: SessionId,
    pub kind: RequestKind,
}

impl ChatRequest {
    pub fn new(session: SessionId, kind: RequestKind) -> Self {
        Self { session, kind }
    }

    /// Classify raw chat text with [`RequestKind::from_text`].
    pub fn from_text(session: SessionId, text: &str) -> Self {
        Self::new(session, RequestKind::from_text(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Generated,
    Apology,
    Image,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub session: SessionId,
    pub kind: ReplyKind,
    /// Display-ready text (markup converted for generated replies)
    pub response: String,
}

/// Runs chat rounds against one catalog snapshot.
pub struct ChatEngine {
    provider: Arc<dyn Provider>,
    images: Arc<dyn ImageSearch>,
    catalog: Arc<Catalog>,
    sessions: SessionStore,
    composer: PromptComposer,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tokens_used: AtomicU64,
}

impl ChatEngine {
    pub fn new(
        provider: Arc<dyn Provider>,
        images: Arc<dyn ImageSearch>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            provider,
            images,
            catalog,
            sessions: SessionStore::default(),
            composer: PromptComposer::default(),
            model: "gpt-4-turbo".into(),
            temperature: 0.7,
            max_tokens: Some(1000),
            tokens_used: AtomicU64::new(0),
        }
    }

    /// An engine with model, sampling, and history settings taken from config.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        images: Arc<dyn ImageSearch>,
        catalog: Arc<Catalog>,
    ) -> Self {
        let mut composer = PromptComposer::new().with_digest_rows(config.chat.digest_rows);
        if let Some(persona) = &config.chat.persona {
            composer = composer.with_persona(persona);
        }
        Self::new(provider, images, catalog)
            .with_model(config.generation_model())
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_sessions(SessionStore::new(
                config.chat.history_window,
                config.chat.max_sessions,
            ))
            .with_composer(composer)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Total tokens the provider reported across all rounds.
    pub fn tokens_used(&self) -> u64 {
        self.tokens_used.load(Ordering::Relaxed)
    }

    pub async fn handle(&self, request: ChatRequest) -> ChatReply {
        match request.kind {
            RequestKind::Image { query } => {
                let response = self.image_reply(&query).await;
                ChatReply {
                    session: request.session,
                    kind: ReplyKind::Image,
                    response,
                }
            }
            RequestKind::Message { text } => {
                let (kind, raw) = match self.generate_round(&request.session, &text).await {
                    Some(reply) => (ReplyKind::Generated, reply),
                    None => (ReplyKind::Apology, GENERATION_APOLOGY.to_string()),
                };
                ChatReply {
                    session: request.session,
                    kind,
                    response: markup::to_html(&raw),
                }
            }
        }
    }

    /// One message round. Returns the raw reply, or `None` when generation
    /// failed (the transcript then holds the new user turn only).
    async fn generate_round(&self, session: &SessionId, text: &str) -> Option<String> {
        let transcript = self.sessions.transcript(session).await;
        let mut transcript = transcript.lock().await;

        transcript.push(Message::user(text));
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: self.composer.compose(&self.catalog, &transcript),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            session = %session,
            provider = %self.provider.name(),
            turns = transcript.len(),
            "Generating reply"
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    self.tokens_used
                        .fetch_add(u64::from(usage.total_tokens), Ordering::Relaxed);
                    debug!(
                        session = %session,
                        model = %response.model,
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "Provider usage"
                    );
                }
                let reply = response.text();
                transcript.push(Message::assistant(reply.clone()));
                let dropped = transcript.trim();
                if dropped > 0 {
                    debug!(session = %session, dropped, "Transcript trimmed");
                }
                Some(reply)
            }
            Err(e) => {
                warn!(session = %session, error = %e, "Generation failed");
                None
            }
        }
    }

    async fn image_reply(&self, query: &str) -> String {
        let found = match self.images.first_image(query).await {
            Ok(Some(url)) => url,
            Ok(None) => IMAGE_NOT_FOUND.to_string(),
            Err(e) => {
                warn!(backend = %self.images.name(), error = %e, "Image lookup failed");
                IMAGE_FETCH_ERROR.to_string()
            }
        };
        info!(query, "Image request answered");
        format!("Here is the image for {query} : {found}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, ScriptedProvider, StaticImageSearch};
    use lappybot_config::ProviderConfig;
    use lappybot_core::error::ProviderError;
    use lappybot_core::laptop::LaptopRecord;
    use lappybot_core::message::Role;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_records(vec![
            LaptopRecord::new("asus", "TUF Gaming F15", 4299.0).with_ram(16),
            LaptopRecord::new("hp", "Pavilion 14", 2799.0),
        ]))
    }

    fn engine(provider: Arc<dyn Provider>) -> ChatEngine {
        ChatEngine::new(provider, Arc::new(StaticImageSearch::found("https://img/x.jpg")), catalog())
    }

    fn message(session: &str, text: &str) -> ChatRequest {
        ChatRequest::new(SessionId::from(session), RequestKind::message(text))
    }

    #[test]
    fn from_text_detects_image_requests() {
        assert_eq!(
            RequestKind::from_text("Show me an image for the Dell XPS 15 "),
            RequestKind::image("Dell XPS 15")
        );
        assert_eq!(
            RequestKind::from_text("IMAGE for the HP Omen"),
            RequestKind::message("IMAGE for the HP Omen")
        );
        assert_eq!(
            RequestKind::from_text("Does the image quality matter?"),
            RequestKind::message("Does the image quality matter?")
        );
        assert_eq!(
            RequestKind::from_text("best laptop for gaming"),
            RequestKind::message("best laptop for gaming")
        );
    }

    #[test]
    fn from_text_stops_at_repeated_phrase() {
        assert_eq!(
            RequestKind::from_text("image for the Acer image for the Asus"),
            RequestKind::image("Acer")
        );
    }

    #[tokio::test]
    async fn successful_round_appends_both_turns() {
        let provider = Arc::new(ScriptedProvider::new(vec!["  **Asus TUF** fits.\nEnjoy! "]));
        let engine = engine(provider.clone());

        let reply = engine.handle(message("s", "gaming under 5000?")).await;
        assert_eq!(reply.kind, ReplyKind::Generated);
        assert_eq!(reply.response, "<b>Asus TUF</b> fits.<br>Enjoy!");

        let transcript = engine.sessions().transcript(&SessionId::from("s")).await;
        let transcript = transcript.lock().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, Role::User);
        assert_eq!(transcript.turns()[1].content, "**Asus TUF** fits.\nEnjoy!");
        assert_eq!(engine.tokens_used(), 15);
    }

    #[tokio::test]
    async fn prompt_has_system_turn_then_history() {
        let provider = Arc::new(ScriptedProvider::new(vec!["one", "two"]));
        let engine = engine(provider.clone());
        engine.handle(message("s", "first")).await;
        engine.handle(message("s", "second")).await;

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        let last = &requests[1];
        assert_eq!(last.model, "gpt-4-turbo");
        assert_eq!(last.max_tokens, Some(1000));
        assert_eq!(last.messages.len(), 4);
        assert_eq!(last.messages[0].role, Role::System);
        assert!(last.messages[0].content.contains("Model: TUF Gaming F15, Price: MYR 4299.0, RAM: 16GB"));
        let contents: Vec<&str> = last.messages[1..].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "one", "second"]);
    }

    #[tokio::test]
    async fn transcript_never_exceeds_window() {
        let replies: Vec<String> = (0..12).map(|i| format!("reply {i}")).collect();
        let provider = Arc::new(ScriptedProvider::new(replies));
        let engine = engine(provider.clone());

        for i in 0..12 {
            engine.handle(message("s", &format!("question {i}"))).await;
            let transcript = engine.sessions().transcript(&SessionId::from("s")).await;
            assert!(transcript.lock().await.len() <= 5);
        }

        let transcript = engine.sessions().transcript(&SessionId::from("s")).await;
        let transcript = transcript.lock().await;
        assert_eq!(transcript.turns()[4].content, "reply 11");
        assert_eq!(transcript.turns()[0].content, "reply 9");

        // The prompt of the last round saw the trimmed history plus the new turn.
        let last = provider.requests().pop().unwrap();
        assert_eq!(last.messages.len(), 1 + 6);
    }

    #[tokio::test]
    async fn failure_keeps_user_turn_without_assistant_turn() {
        let engine = engine(Arc::new(FailingProvider::new(ProviderError::Timeout("slow".into()))));

        let reply = engine.handle(message("s", "hello?")).await;
        assert_eq!(reply.kind, ReplyKind::Apology);
        assert_eq!(reply.response, GENERATION_APOLOGY);

        let transcript = engine.sessions().transcript(&SessionId::from("s")).await;
        let transcript = transcript.lock().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role, Role::User);
        assert_eq!(engine.tokens_used(), 0);
    }

    #[tokio::test]
    async fn sessions_do_not_share_history() {
        let provider = Arc::new(ScriptedProvider::new(vec!["a", "b"]));
        let engine = engine(provider.clone());
        engine.handle(message("alice", "from alice")).await;
        engine.handle(message("bob", "from bob")).await;

        let bob_prompt = &provider.requests()[1];
        assert_eq!(bob_prompt.messages.len(), 2);
        assert!(bob_prompt.messages.iter().all(|m| m.content != "from alice"));
    }

    #[tokio::test]
    async fn image_request_skips_transcript_and_provider() {
        let provider = Arc::new(ScriptedProvider::new(Vec::<String>::new()));
        let engine = engine(provider.clone());

        let reply = engine
            .handle(ChatRequest::from_text(SessionId::from("s"), "image for the Omen 16"))
            .await;
        assert_eq!(reply.kind, ReplyKind::Image);
        assert_eq!(reply.response, "Here is the image for Omen 16 : https://img/x.jpg");
        assert!(provider.requests().is_empty());
        assert!(!engine.sessions().contains(&SessionId::from("s")).await);
    }

    #[tokio::test]
    async fn image_not_found_and_error() {
        let provider: Arc<dyn Provider> = Arc::new(ScriptedProvider::new(Vec::<String>::new()));

        let engine = ChatEngine::new(provider.clone(), Arc::new(StaticImageSearch::empty()), catalog());
        let reply = engine.handle(message_image("Zenbook")).await;
        assert_eq!(reply.response, "Here is the image for Zenbook : No image found");

        let engine = ChatEngine::new(provider, Arc::new(StaticImageSearch::failing()), catalog());
        let reply = engine.handle(message_image("Zenbook")).await;
        assert_eq!(reply.response, "Here is the image for Zenbook : Error fetching image");
    }

    fn message_image(query: &str) -> ChatRequest {
        ChatRequest::new(SessionId::from("img"), RequestKind::image(query))
    }

    #[tokio::test]
    async fn from_config_applies_settings() {
        let mut config = AppConfig::default();
        config.default_model = "gpt-4o-mini".into();
        config.default_max_tokens = 256;
        config.chat.history_window = 2;
        config.chat.persona = Some("Be brief.".into());

        let provider = Arc::new(ScriptedProvider::new(vec!["ok", "ok", "ok"]));
        let engine = ChatEngine::from_config(
            &config,
            provider.clone(),
            Arc::new(StaticImageSearch::empty()),
            catalog(),
        );
        for _ in 0..3 {
            engine.handle(message("s", "hi")).await;
        }

        let transcript = engine.sessions().transcript(&SessionId::from("s")).await;
        assert_eq!(transcript.lock().await.len(), 2);
        let last = provider.requests().pop().unwrap();
        assert_eq!(last.model, "gpt-4o-mini");
        assert_eq!(last.max_tokens, Some(256));
        assert!(last.messages[0].content.starts_with("Be brief. You are LappyBot"));
    }

    #[tokio::test]
    async fn from_config_prefers_provider_default_model() {
        let mut config = AppConfig::default();
        config.default_provider = "ollama".into();
        config.providers.insert(
            "ollama".into(),
            ProviderConfig {
                api_key: Some("ollama".into()),
                api_url: Some("http://localhost:11434/v1".into()),
                default_model: Some("llama3".into()),
            },
        );

        let provider = Arc::new(ScriptedProvider::new(vec!["ok"]));
        let engine = ChatEngine::from_config(
            &config,
            provider.clone(),
            Arc::new(StaticImageSearch::empty()),
            catalog(),
        );
        engine.handle(message("s", "hi")).await;

        assert_eq!(provider.requests().pop().unwrap().model, "llama3");
    }
}
