//! Session resolution and authentication.
//!
//! Two-factor: a session identifier resolves the record, and a separate
//! bearer token must match the record's stored credential. The identifier
//! alone never grants access, so observing or guessing an id is not enough
//! to hijack a session.
//!
//! Identifier carriers, first match wins: `X-Session-Id` header →
//! `session_id` query parameter → `leetmentor_session` cookie.
//! Token carriers: `X-Session-Auth` header → `leetmentor_auth` cookie.

use crate::{ApiError, SharedState};
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use leetmentor_core::error::SessionError;
use leetmentor_core::session::{Session, SessionId};

pub const SESSION_ID_HEADER: &str = "x-session-id";
pub const SESSION_AUTH_HEADER: &str = "x-session-auth";
pub const SESSION_ID_COOKIE: &str = "leetmentor_session";
pub const SESSION_AUTH_COOKIE: &str = "leetmentor_auth";

/// A resolved, authenticated session.
///
/// Carries the id plus a snapshot of the record taken at resolution time;
/// the extractor itself never mutates the store.
pub struct SessionContext {
    pub id: SessionId,
    pub session: Session,
}

impl FromRequestParts<SharedState> for SessionContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let id = resolve_session_id(parts).ok_or(SessionError::MissingSessionId)?;

        let session = state
            .store
            .get(&id)
            .await
            .ok_or_else(|| SessionError::SessionNotFound(id.to_string()))?;

        let provided = header_value(parts, SESSION_AUTH_HEADER)
            .or_else(|| cookie_value(parts, SESSION_AUTH_COOKIE));
        match provided {
            Some(token) if token == session.auth_token => {}
            _ => return Err(SessionError::InvalidAuth.into()),
        }

        Ok(SessionContext { id, session })
    }
}

/// Find a session id from header, query string, or cookie.
fn resolve_session_id(parts: &Parts) -> Option<SessionId> {
    if let Some(id) = header_value(parts, SESSION_ID_HEADER) {
        return Some(SessionId::from(&id));
    }

    if let Some(id) = query_value(parts, "session_id") {
        return Some(SessionId::from(&id));
    }

    cookie_value(parts, SESSION_ID_COOKIE).map(|id| SessionId::from(&id))
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn query_value(parts: &Parts, key: &str) -> Option<String> {
    let query = parts.uri.query()?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key && !v.is_empty()).then(|| v.to_string())
    })
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|cookie| {
        let (k, v) = cookie.trim().split_once('=')?;
        (k == name && !v.is_empty()).then(|| v.to_string())
    })
}

/// A `Set-Cookie` value attaching a session cookie.
pub fn attach_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")
}

/// A `Set-Cookie` value expiring a session cookie.
pub fn expire_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_wins_over_query_and_cookie() {
        let parts = parts_for(
            "/chat?session_id=from-query",
            &[
                ("X-Session-Id", "from-header"),
                ("Cookie", "leetmentor_session=from-cookie"),
            ],
        );
        assert_eq!(
            resolve_session_id(&parts),
            Some(SessionId::from("from-header"))
        );
    }

    #[test]
    fn query_wins_over_cookie() {
        let parts = parts_for(
            "/chat?session_id=from-query",
            &[("Cookie", "leetmentor_session=from-cookie")],
        );
        assert_eq!(
            resolve_session_id(&parts),
            Some(SessionId::from("from-query"))
        );
    }

    #[test]
    fn cookie_is_the_last_resort() {
        let parts = parts_for(
            "/chat",
            &[("Cookie", "other=1; leetmentor_session=from-cookie")],
        );
        assert_eq!(
            resolve_session_id(&parts),
            Some(SessionId::from("from-cookie"))
        );
    }

    #[test]
    fn no_carrier_resolves_nothing() {
        let parts = parts_for("/chat", &[]);
        assert_eq!(resolve_session_id(&parts), None);
    }

    #[test]
    fn empty_carrier_values_are_ignored() {
        let parts = parts_for("/chat?session_id=", &[("X-Session-Id", "")]);
        assert_eq!(resolve_session_id(&parts), None);
    }

    #[test]
    fn cookie_helpers_are_symmetric() {
        let set = attach_cookie(SESSION_ID_COOKIE, "abc");
        assert!(set.starts_with("leetmentor_session=abc"));
        assert!(set.contains("HttpOnly"));

        let clear = expire_cookie(SESSION_ID_COOKIE);
        assert!(clear.contains("Max-Age=0"));
    }
}
