//! In-memory session store — a process-lifetime keyed map.
//!
//! Records live until explicitly deleted and are lost on restart. Each
//! record sits behind its own async mutex, so concurrent turns against the
//! *same* session are serialized (closing the read-modify-write race a bare
//! map would have) while distinct sessions proceed in parallel. A request
//! holds the guard for the duration of one pipeline turn and writes the
//! updated record in place only on success.

use leetmentor_core::session::{Session, SessionId};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

/// Task-safe keyed store of session records.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `username` with a fresh identifier and a fresh
    /// bearer token. Returns the id plus a snapshot of the new record.
    pub async fn create(&self, username: impl Into<String>) -> (SessionId, Session) {
        let id = SessionId::new();
        let session = Session::new(username, generate_auth_token());
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session.clone())));
        debug!(session_id = %id, "Session created");
        (id, session)
    }

    /// Snapshot a session record.
    pub async fn get(&self, id: &SessionId) -> Option<Session> {
        let slot = self.sessions.read().await.get(id).cloned()?;
        let session = slot.lock().await;
        Some(session.clone())
    }

    /// Acquire exclusive access to a session for the duration of one turn.
    ///
    /// The owned guard keeps the record alive even if the session is deleted
    /// while the turn is in flight; the final unlock simply drops it.
    pub async fn lock(&self, id: &SessionId) -> Option<OwnedMutexGuard<Session>> {
        let slot = self.sessions.read().await.get(id).cloned()?;
        Some(slot.lock_owned().await)
    }

    /// Delete a session. Idempotent: deleting an absent id returns `false`
    /// without error.
    pub async fn delete(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!(session_id = %id, "Session deleted");
        }
        removed
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Generate a 128-bit random bearer token, hex-encoded.
fn generate_auth_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetmentor_core::message::Message;

    #[tokio::test]
    async fn create_and_read_back() {
        let store = SessionStore::new();
        let (id, created) = store.create("alice").await;

        let read = store.get(&id).await.unwrap();
        assert_eq!(read.username, "alice");
        assert_eq!(read.auth_token, created.auth_token);
        assert!(read.messages.is_empty());
    }

    #[tokio::test]
    async fn tokens_are_random_and_well_formed() {
        let store = SessionStore::new();
        let (_, a) = store.create("alice").await;
        let (_, b) = store.create("bob").await;
        assert_ne!(a.auth_token, b.auth_token);
        assert_eq!(a.auth_token.len(), 32);
        assert!(a.auth_token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new();
        let (id_a, _) = store.create("alice").await;
        let (id_b, _) = store.create("bob").await;

        {
            let mut guard = store.lock(&id_a).await.unwrap();
            guard.push(Message::user("only for alice"));
        }

        assert_eq!(store.get(&id_a).await.unwrap().messages.len(), 1);
        assert!(store.get(&id_b).await.unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = SessionStore::new();
        let (id, _) = store.create("alice").await;

        assert!(store.delete(&id).await);
        assert!(!store.delete(&id).await);
        assert!(store.get(&id).await.is_none());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn unknown_id_yields_nothing() {
        let store = SessionStore::new();
        let id = SessionId::new();
        assert!(store.get(&id).await.is_none());
        assert!(store.lock(&id).await.is_none());
    }

    #[tokio::test]
    async fn same_session_turns_are_serialized() {
        let store = Arc::new(SessionStore::new());
        let (id, _) = store.create("alice").await;

        // Two tasks append under the per-session lock; both writes must land.
        let mut handles = Vec::new();
        for i in 0..2 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let mut guard = store.lock(&id).await.unwrap();
                let before = guard.messages.len();
                tokio::task::yield_now().await;
                guard.push(Message::user(format!("turn {i}")));
                assert_eq!(guard.messages.len(), before + 1);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get(&id).await.unwrap().messages.len(), 2);
    }

    #[tokio::test]
    async fn in_flight_guard_survives_deletion() {
        let store = SessionStore::new();
        let (id, _) = store.create("alice").await;

        let mut guard = store.lock(&id).await.unwrap();
        assert!(store.delete(&id).await);

        // The turn already in flight can still finish against its guard.
        guard.push(Message::user("late write"));
        assert_eq!(guard.messages.len(), 1);
        drop(guard);

        assert!(store.get(&id).await.is_none());
    }
}
