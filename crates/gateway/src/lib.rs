//! HTTP API gateway for LeetMentor.
//!
//! Exposes the session lifecycle and chat endpoints:
//!
//! - `POST /create_session/{name}` — create a session, receive id + cookies
//! - `POST /chat`                  — run one pipeline turn
//! - `POST /questions`             — run a turn from a templated question
//! - `GET  /whoami`                — return the session record
//! - `POST /delete_session`        — delete the session, clear cookies
//! - `GET  /health`                — liveness probe
//!
//! Built on Axum for high performance async HTTP.

pub mod api;
pub mod auth;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use leetmentor_core::error::{Error, PipelineError, ProviderError, SessionError};
use leetmentor_core::provider::Provider;
use leetmentor_pipeline::TurnRunner;
use leetmentor_session::SessionStore;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Shared application state for the gateway.
pub struct AppState {
    pub store: SessionStore,
    pub runner: TurnRunner,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(provider: Arc<dyn Provider>, config: &leetmentor_config::AppConfig) -> Self {
        Self {
            store: SessionStore::new(),
            runner: TurnRunner::new(provider, &config.model, config.temperature)
                .with_max_tokens(config.max_tokens),
        }
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(api::health_handler))
        .route("/create_session/{name}", post(api::create_session_handler))
        .route("/chat", post(api::chat_handler))
        .route("/questions", post(api::questions_handler))
        .route("/whoami", get(api::whoami_handler))
        .route("/delete_session", post(api::delete_session_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from configured origins.
///
/// Credentials are enabled so the session cookies can flow, which is why the
/// origin list is explicit rather than a wildcard.
pub fn build_cors(config: &leetmentor_config::GatewayConfig) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-session-id"),
            axum::http::HeaderName::from_static("x-session-auth"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Start the gateway HTTP server.
pub async fn start(config: leetmentor_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = leetmentor_providers::build_from_config(&config)
        .ok_or("No API key configured — set LEETMENTOR_API_KEY or ANTHROPIC_API_KEY")?;

    let state = Arc::new(AppState::new(provider, &config));
    let app = build_router(state).layer(build_cors(&config.gateway));

    info!(addr = %addr, model = %config.model, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Error responses ---

/// Error body returned by every failing endpoint: a short taxonomy tag plus
/// a human-readable message.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Gateway-level error — wraps the domain error and renders it as an HTTP
/// response. Session/auth failures reject the request before the pipeline
/// runs; pipeline and provider failures abort the turn with the session
/// left untouched.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(Error::Session(err))
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, tag) = match &self.0 {
            Error::Session(e) => {
                let status = match e {
                    SessionError::MissingSessionId => StatusCode::UNAUTHORIZED,
                    SessionError::SessionNotFound(_) => StatusCode::NOT_FOUND,
                    SessionError::InvalidAuth => StatusCode::FORBIDDEN,
                };
                warn!(error = %e, "Request rejected before pipeline");
                (status, e.tag())
            }
            Error::Pipeline(e) => {
                let status = match e {
                    PipelineError::EmptyHistory => StatusCode::UNPROCESSABLE_ENTITY,
                    PipelineError::UnrecognizedIntent { .. } => StatusCode::BAD_GATEWAY,
                    PipelineError::InvalidTransition { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error!(error = %e, "Pipeline turn aborted");
                (status, e.tag())
            }
            Error::Provider(e) => {
                let status = match e {
                    ProviderError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    ProviderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                error!(error = %e, "Model invocation failed");
                (status, "provider")
            }
        };

        let body = ErrorBody {
            error: tag,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
