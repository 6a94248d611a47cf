//! Endpoint handlers for the gateway.

use crate::auth::{
    attach_cookie, expire_cookie, SessionContext, SESSION_AUTH_COOKIE, SESSION_ID_COOKIE,
};
use crate::{ApiError, SharedState};
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Json};
use leetmentor_core::error::SessionError;
use leetmentor_core::message::Role;
use leetmentor_core::session::{Session, SessionId};
use leetmentor_pipeline::state::TurnMessage;
use leetmentor_session::{apply_turn, session_to_turn};
use serde::{Deserialize, Serialize};
use tracing::info;

// --- Request / Response types ---

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    ok: bool,
    session_id: String,
    username: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    text: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    reply: String,
    username: String,
    message_count: usize,
    message_type: Option<String>,
}

#[derive(Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    lc_question_number: Option<u64>,
    #[serde(default)]
    lc_question_title: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum QuestionResponse {
    Ok {
        ok: bool,
        res: String,
        message_count: usize,
        message_type: Option<String>,
        session_id: String,
    },
    Err {
        ok: bool,
        error: &'static str,
    },
}

#[derive(Serialize)]
pub struct DeleteSessionResponse {
    ok: bool,
}

// --- Handlers ---

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /create_session/{name}` — one fresh record per call. The identifier
/// and token are attached as cookies so browser clients authenticate
/// implicitly on later requests.
pub async fn create_session_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let (id, session) = state.store.create(&name).await;

    info!(session_id = %id, username = %name, "Session created");

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            attach_cookie(SESSION_ID_COOKIE, &id.to_string()),
        ),
        (
            SET_COOKIE,
            attach_cookie(SESSION_AUTH_COOKIE, &session.auth_token),
        ),
    ]);

    (
        cookies,
        Json(CreateSessionResponse {
            ok: true,
            session_id: id.to_string(),
            username: session.username,
        }),
    )
}

/// `POST /chat` — one pipeline turn with the given text as the new user
/// message.
pub async fn chat_handler(
    State(state): State<SharedState>,
    ctx: SessionContext,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let (session, reply) = run_session_turn(&state, &ctx.id, payload.text).await?;

    Ok(Json(ChatResponse {
        reply,
        username: session.username,
        message_count: session.messages.len(),
        message_type: session.message_type,
    }))
}

/// `POST /questions` — synthesizes a templated user message embedding the
/// question number/title and runs one pipeline turn with it.
pub async fn questions_handler(
    State(state): State<SharedState>,
    ctx: SessionContext,
    payload: Option<Json<QuestionRequest>>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let Some(number) = payload.as_ref().and_then(|p| p.lc_question_number) else {
        return Ok(Json(QuestionResponse::Err {
            ok: false,
            error: "Missing lc_question_number",
        }));
    };

    let title_fragment = payload
        .as_ref()
        .and_then(|p| p.lc_question_title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!(" titled '{t}'"))
        .unwrap_or_default();

    let statement = format!(
        "LeetCode Question #{number}:{title_fragment}. \
         Please identify and confirm the full title of this question, then gather and store \
         all relevant details about it. In your acknowledgment, respond with: Title of the \
         question and 'How may I assist you further?'"
    );

    let (session, reply) = run_session_turn(&state, &ctx.id, statement).await?;

    Ok(Json(QuestionResponse::Ok {
        ok: true,
        res: reply,
        message_count: session.messages.len(),
        message_type: session.message_type,
        session_id: ctx.id.to_string(),
    }))
}

/// `GET /whoami` — the session record verbatim.
pub async fn whoami_handler(ctx: SessionContext) -> Json<Session> {
    Json(ctx.session)
}

/// `POST /delete_session` — removes the record and expires both cookies.
pub async fn delete_session_handler(
    State(state): State<SharedState>,
    ctx: SessionContext,
) -> impl IntoResponse {
    state.store.delete(&ctx.id).await;

    info!(session_id = %ctx.id, "Session deleted");

    let cookies = AppendHeaders([
        (SET_COOKIE, expire_cookie(SESSION_ID_COOKIE)),
        (SET_COOKIE, expire_cookie(SESSION_AUTH_COOKIE)),
    ]);

    (cookies, Json(DeleteSessionResponse { ok: true }))
}

/// Run one pipeline turn against a locked session.
///
/// The per-session lock is held for the whole turn, serializing concurrent
/// requests to the same session. The record is rewritten only after the
/// turn succeeds; any failure drops the working state and leaves the record
/// exactly as it was.
async fn run_session_turn(
    state: &SharedState,
    id: &SessionId,
    user_text: String,
) -> Result<(Session, String), ApiError> {
    let mut guard = state
        .store
        .lock(id)
        .await
        .ok_or_else(|| SessionError::SessionNotFound(id.to_string()))?;

    let mut turn = session_to_turn(&guard);
    turn.messages.push(TurnMessage::user(user_text));

    let finished = state.runner.run_turn(turn).await?;

    let reply = finished
        .messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    apply_turn(&mut guard, finished);
    Ok((guard.clone(), reply))
}
