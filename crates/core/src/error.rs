//! Error types for the LeetMentor domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all LeetMentor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Pipeline errors ---
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors raised while resolving or authenticating a session.
///
/// All of these reject the request before the pipeline runs, so a failed
/// request never mutates the session record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session id missing: provide the X-Session-Id header, session_id query param, or the session cookie")]
    MissingSessionId,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid session auth token")]
    InvalidAuth,
}

/// Errors raised inside a single classify → route → handle turn.
///
/// A pipeline error aborts the turn before write-back, leaving the session
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Cannot classify an empty conversation: no user message present")]
    EmptyHistory,

    #[error("Classifier returned a label outside the taxonomy: {raw:?}")]
    UnrecognizedIntent { raw: String },

    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}

impl SessionError {
    /// Short machine-readable tag used in HTTP error bodies.
    pub fn tag(&self) -> &'static str {
        match self {
            SessionError::MissingSessionId => "missing_session_id",
            SessionError::SessionNotFound(_) => "session_not_found",
            SessionError::InvalidAuth => "invalid_auth",
        }
    }
}

impl PipelineError {
    /// Short machine-readable tag used in HTTP error bodies.
    pub fn tag(&self) -> &'static str {
        match self {
            PipelineError::EmptyHistory => "empty_history",
            PipelineError::UnrecognizedIntent { .. } => "unrecognized_intent",
            PipelineError::InvalidTransition { .. } => "invalid_transition",
        }
    }
}
