//! HTTP API gateway for LappyBot.
//!
//! Thin JSON endpoints over the catalog advisor, the chat engine, and the
//! guide book. Business failures (bad budget, no match) come back as
//! `{"error": ...}` bodies; only unexpected failures use HTTP 500.
//!
//! Built on Axum.

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use lappybot_agent::{ChatEngine, ChatRequest, RequestKind, markup};
use lappybot_catalog::advisor::{
    CATALOG_UNAVAILABLE, MISSING_BUDGET, NO_QUIZ_MATCH, NO_RECOMMENDATION, invalid_amount_message,
};
use lappybot_catalog::{
    AppliedFilters, Catalog, CompareQuery, GuideBook, LaptopAdvisor, LaptopCard, QuizAnswers,
    QuizOutcome, RecommendOutcome, RecommendQuery, parse_amount,
};
use lappybot_config::{AppConfig, GatewayConfig};
use lappybot_core::error::{CatalogError, Error};
use lappybot_core::message::SessionId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

pub const CHAT_FAILURE: &str = "Oops! Something went wrong. Please try again.";
pub const COMPARE_FAILURE: &str = "Oops! Something went wrong while generating the comparison.";
pub const RECOMMEND_FAILURE: &str =
    "Oops! Something went wrong while generating the recommendation.";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: AppConfig,
    pub advisor: LaptopAdvisor,
    pub chat: ChatEngine,
    pub guide: GuideBook,
    rng: Mutex<StdRng>,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    /// The recommend RNG is seeded from `[recommend] seed` when set,
    /// otherwise from OS entropy.
    pub fn new(config: AppConfig, advisor: LaptopAdvisor, chat: ChatEngine, guide: GuideBook) -> Self {
        let rng = match config.recommend.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            advisor,
            chat,
            guide,
            rng: Mutex::new(rng),
        }
    }

    /// Load the catalog, build the providers, and parse the guide data.
    ///
    /// A missing or malformed catalog is not fatal: the gateway serves an
    /// empty one and the catalog endpoints report it.
    pub fn from_config(config: AppConfig) -> lappybot_core::Result<Self> {
        let catalog = Arc::new(Catalog::load_or_empty(&config.catalog.path));
        let provider = lappybot_providers::build_generator(&config).ok_or_else(|| Error::Config {
            message: format!("no provider registered as '{}'", config.default_provider),
        })?;
        let images = lappybot_providers::build_image_search(&config);
        let guide =
            GuideBook::builtin().map_err(|e| Error::Internal(format!("guide data: {e}")))?;

        info!(
            records = catalog.len(),
            images = %images.name(),
            "Gateway state ready"
        );

        let chat = ChatEngine::from_config(&config, provider, images, catalog.clone());
        Ok(Self::new(config, LaptopAdvisor::new(catalog), chat, guide))
    }
}

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS limited to the gateway's own origin
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway);
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/recommend", post(recommend_handler))
        .route("/quiz", post(quiz_handler))
        .route("/compare", post(compare_handler))
        .route("/faq", post(faq_handler))
        .route(
            "/troubleshooting",
            get(issues_handler).post(troubleshooting_handler),
        )
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    let origin = format!("http://{}:{}", config.host, config.port);
    match HeaderValue::from_str(&origin) {
        Ok(value) => cors.allow_origin(AllowOrigin::exact(value)),
        Err(e) => {
            warn!(origin = %origin, error = %e, "Invalid CORS origin, cross-origin requests disabled");
            cors
        }
    }
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = Arc::new(GatewayState::from_config(config)?);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Response helpers ---

fn error_body(message: &str) -> Response {
    Json(json!({ "error": message })).into_response()
}

fn failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "response": message })),
    )
        .into_response()
}

/// Read an amount the way a form posts it: absent, null, numeric zero, and
/// empty values count as "not given" (`None`). Other numbers pass through.
/// Non-empty strings are parsed, so `"0"` is a real zero. Anything else is
/// invalid.
fn amount_field(field: &str, value: &Value) -> Option<Result<f64, CatalogError>> {
    let invalid = || CatalogError::InvalidNumericInput {
        field: field.to_string(),
        value: value.to_string(),
    };
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(parse_amount(field, s)),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => None,
            Some(v) => Some(Ok(v)),
            None => Some(Err(invalid())),
        },
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        _ => Some(Err(invalid())),
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    catalog_records: usize,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalog_records: state.advisor.catalog().len(),
    })
}

#[derive(Deserialize)]
struct ChatBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    session_id: Option<String>,
    /// Ask for a picture of this model directly instead of classifying
    /// `message`
    #[serde(default)]
    image_query: Option<String>,
}

impl ChatBody {
    fn request_kind(&self) -> RequestKind {
        match self.image_query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => RequestKind::image(query),
            _ => RequestKind::from_text(&self.message),
        }
    }
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    session_id: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "Unreadable chat request");
            return failure(CHAT_FAILURE);
        }
    };

    let kind = body.request_kind();
    // A fresh session is minted when the caller has none yet.
    let session = body
        .session_id
        .filter(|id| !id.trim().is_empty())
        .map(SessionId)
        .unwrap_or_default();

    info!(session = %session, message_len = body.message.len(), "Chat message received");
    let reply = state
        .chat
        .handle(ChatRequest::new(session, kind))
        .await;

    Json(ChatResponse {
        response: reply.response,
        session_id: reply.session.0,
    })
    .into_response()
}

#[derive(Deserialize)]
struct RecommendBody {
    #[serde(default)]
    budget: Value,
    #[serde(default)]
    use_case: String,
}

#[derive(Serialize)]
struct RecommendResponse {
    /// Display-ready announcement
    response: String,
    laptop: LaptopCard,
    description: String,
}

async fn recommend_handler(
    State(state): State<SharedState>,
    payload: Result<Json<RecommendBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "Unreadable recommend request");
            return failure(RECOMMEND_FAILURE);
        }
    };

    let budget = match amount_field("budget", &body.budget) {
        None => return error_body(MISSING_BUDGET),
        Some(Err(e)) => {
            warn!(error = %e, "Rejected recommend budget");
            return error_body(&invalid_amount_message("budget"));
        }
        Some(Ok(budget)) => budget,
    };

    let query = RecommendQuery::new(budget, body.use_case);
    let outcome = {
        let mut rng = state.rng.lock().unwrap_or_else(|e| e.into_inner());
        state.advisor.recommend(&query, &mut *rng)
    };

    match outcome {
        RecommendOutcome::Recommended(pick) => {
            info!(position = pick.position, eligible = pick.eligible, "Recommendation made");
            Json(RecommendResponse {
                response: markup::to_html(&pick.message),
                laptop: pick.laptop,
                description: pick.description,
            })
            .into_response()
        }
        RecommendOutcome::NoMatch => error_body(NO_RECOMMENDATION),
    }
}

#[derive(Serialize)]
struct QuizResponse {
    recommendations: Vec<LaptopCard>,
}

/// Answers arrive keyed by question index: "0" use case, "1" budget,
/// "2" screen size. Non-string answers are ignored.
async fn quiz_handler(
    State(state): State<SharedState>,
    Json(answers): Json<HashMap<String, Value>>,
) -> Response {
    let answer = |key: &str| {
        answers
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let answers = QuizAnswers::new(answer("0"), answer("1"), answer("2"));

    match state.advisor.quiz(&answers) {
        QuizOutcome::Matches(recommendations) => Json(QuizResponse { recommendations }).into_response(),
        QuizOutcome::NoMatch => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": NO_QUIZ_MATCH })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct CompareBody {
    #[serde(default)]
    brands: Vec<String>,
    #[serde(default)]
    max_price: Value,
}

#[derive(Serialize)]
struct CompareResponse {
    comparison_table: String,
    matches: usize,
    filters: AppliedFilters,
}

async fn compare_handler(
    State(state): State<SharedState>,
    payload: Result<Json<CompareBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "Unreadable compare request");
            return failure(COMPARE_FAILURE);
        }
    };

    if state.advisor.catalog().is_empty() {
        return error_body(CATALOG_UNAVAILABLE);
    }

    let max_price = match amount_field("max price", &body.max_price) {
        None => None,
        Some(Ok(price)) => Some(price),
        Some(Err(e)) => {
            warn!(error = %e, "Rejected compare price ceiling");
            return error_body(&invalid_amount_message("max price"));
        }
    };

    match state.advisor.compare(&CompareQuery::new(body.brands, max_price)) {
        Ok(comparison) => Json(CompareResponse {
            comparison_table: comparison.to_html_table(),
            matches: comparison.len(),
            filters: comparison.filters,
        })
        .into_response(),
        Err(CatalogError::Unavailable) => error_body(CATALOG_UNAVAILABLE),
        Err(e) => {
            error!(error = %e, "Comparison failed");
            failure(COMPARE_FAILURE)
        }
    }
}

#[derive(Deserialize)]
struct FaqBody {
    #[serde(default)]
    question: String,
}

async fn faq_handler(State(state): State<SharedState>, Json(body): Json<FaqBody>) -> Json<Value> {
    Json(json!({ "answer": state.guide.faq(&body.question) }))
}

#[derive(Deserialize)]
struct TroubleshootingBody {
    #[serde(default)]
    issue: String,
}

async fn troubleshooting_handler(
    State(state): State<SharedState>,
    Json(body): Json<TroubleshootingBody>,
) -> Json<Value> {
    Json(json!({ "solution": state.guide.troubleshoot(&body.issue) }))
}

async fn issues_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "issues": state.guide.issues() }))
}
