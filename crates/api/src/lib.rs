mod config;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use translateai_agents::TranslatorAgent;
use translateai_core::{HealthResponse, TranslationRequest, TranslationResponse};
use translateai_ml::load_scorer;
use translateai_observability::AppMetrics;
use translateai_translation::build_provider;

use config::admits_any_origin;
pub use config::{ApiConfig, DEFAULT_BIND, DEFAULT_MAX_BODY_BYTES, DEFAULT_SERVICE_NAME};

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<TranslatorAgent>,
    pub metrics: Arc<AppMetrics>,
    pub service_name: String,
    pub allowed_origins: Arc<Vec<String>>,
    pub max_body_bytes: usize,
}

impl ApiState {
    /// `metrics` should be the same instance the agent records into.
    pub fn new(agent: TranslatorAgent, metrics: Arc<AppMetrics>, config: &ApiConfig) -> Self {
        Self {
            agent: Arc::new(agent),
            metrics,
            service_name: config.service_name.clone(),
            allowed_origins: Arc::new(config.allowed_origins.clone()),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Wires scorer, provider and agent from `config` and returns the router.
pub fn build_app(config: &ApiConfig) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let scorer = load_scorer(config.sentiment_lexicon.as_deref());
    let provider = build_provider(
        config.provider,
        &config.provider_url,
        config.provider_timeout,
    )?;
    let agent = TranslatorAgent::new(scorer, provider, metrics.clone())
        .with_provider_timeout(config.provider_timeout);

    tracing::info!(
        provider = agent.provider_name(),
        scorer = agent.scorer_name(),
        timeout_secs = config.provider_timeout.as_secs(),
        "translator agent ready"
    );

    Ok(build_router(ApiState::new(agent, metrics, config)))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_snapshot))
        .route("/translate", post(translate))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(state.max_body_bytes))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse::healthy(state.service_name.as_str())),
    )
}

async fn metrics_snapshot(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}

/// Always 200 once the body parses; provider trouble only shows up as a
/// translation equal to the normalized input.
async fn translate(
    State(state): State<ApiState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected translate request");
            return (
                rejection.status(),
                Json(serde_json::json!({
                    "error": "invalid_request",
                    "message": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    let result = state
        .agent
        .run_inference(&request.text, &request.target_language)
        .await;

    (StatusCode::OK, Json(TranslationResponse::from(result))).into_response()
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if admits_any_origin(allowed_origins) {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}
