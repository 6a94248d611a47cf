//! Session ↔ pipeline translation.
//!
//! Converts the persisted message sequence into the pipeline's working form
//! and back. Role and content survive the round-trip exactly and order is
//! positional; timestamps are regenerated on write-back, the one accepted
//! lossy field. Write-back rewrites the whole sequence from the pipeline
//! representation, which is the only place the append-only sequence is
//! replaced wholesale.

use leetmentor_core::session::Session;
use leetmentor_pipeline::state::{TurnMessage, TurnState};

/// Build a pipeline turn from the persisted session.
pub fn session_to_turn(session: &Session) -> TurnState {
    let messages = session.messages.iter().map(TurnMessage::from).collect();
    let message_type = session
        .message_type
        .as_deref()
        .and_then(|label| leetmentor_core::intent::Intent::parse(label).ok());
    TurnState::new(messages, message_type)
}

/// Write a finished turn back into the session record.
pub fn apply_turn(session: &mut Session, state: TurnState) {
    session.messages = state.messages.iter().map(TurnMessage::to_message).collect();
    session.message_type = state.message_type.map(|i| i.as_label().to_string());
    session.updated_at = chrono::Utc::now();
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetmentor_core::intent::Intent;
    use leetmentor_core::message::{Message, Role};

    fn session_with_history() -> Session {
        let mut session = Session::new("alice", "tok");
        session.push(Message::user("Remember LeetCode question 1"));
        session.push(Message::assistant("Two Sum"));
        session.message_type = Some("LeetCode Question".into());
        session
    }

    #[test]
    fn round_trip_preserves_role_content_and_order() {
        let mut session = session_with_history();
        let original: Vec<(Role, String)> = session
            .messages
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect();

        let state = session_to_turn(&session);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.message_type, Some(Intent::LeetCodeQuestion));

        apply_turn(&mut session, state);
        let after: Vec<(Role, String)> = session
            .messages
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect();
        assert_eq!(original, after);
        assert_eq!(session.message_type.as_deref(), Some("LeetCode Question"));
    }

    #[test]
    fn apply_turn_records_new_label_and_reply() {
        let mut session = session_with_history();
        let mut state = session_to_turn(&session);

        state.messages.push(TurnMessage::user("Explain the problem"));
        state
            .messages
            .push(TurnMessage::assistant("It asks for indices summing to target."));
        state.message_type = Some(Intent::QuestionExplanation);

        apply_turn(&mut session, state);
        assert_eq!(session.messages.len(), 4);
        assert_eq!(
            session.message_type.as_deref(),
            Some("Question explanation")
        );
        assert_eq!(session.messages[3].role, Role::Assistant);
    }

    #[test]
    fn stale_label_is_dropped_not_guessed() {
        let mut session = Session::new("alice", "tok");
        session.message_type = Some("not a real label".into());

        let state = session_to_turn(&session);
        assert!(state.message_type.is_none());
    }

    #[test]
    fn empty_session_produces_empty_turn() {
        let session = Session::new("bob", "tok");
        let state = session_to_turn(&session);
        assert!(state.messages.is_empty());
        assert!(state.message_type.is_none());
    }
}
