//! Session domain types.
//!
//! A session is the persisted per-user conversation plus its authentication
//! credential. The store exclusively owns all records; a request borrows one
//! for the duration of a turn and writes it back only on success.

use crate::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a session (opaque UUIDv4 token).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted per-user conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Display label, set at creation, immutable thereafter.
    pub username: String,

    /// Secret bearer credential generated at creation.
    /// Required on every subsequent request; never rotated or expired.
    pub auth_token: String,

    /// Ordered messages, append order preserved.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Last classified intent label, or `None` before the first turn.
    #[serde(default)]
    pub message_type: Option<String>,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When the last turn was written back.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new empty session for the given user.
    pub fn new(username: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            auth_token: auth_token.into(),
            messages: Vec::new(),
            message_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the conversation.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn new_session_is_empty() {
        let session = Session::new("alice", "tok");
        assert_eq!(session.username, "alice");
        assert!(session.messages.is_empty());
        assert!(session.message_type.is_none());
    }

    #[test]
    fn push_tracks_updates() {
        let mut session = Session::new("bob", "tok");
        let created = session.created_at;

        session.push(Message::user("First message"));
        assert_eq!(session.messages.len(), 1);
        assert!(session.updated_at >= created);
    }
}
