//! Transient per-invocation pipeline state.
//!
//! `TurnState` exists only for the duration of one request; the session
//! translator builds it from the persisted record and writes it back after
//! the turn completes. `TurnMessage` carries role and content only —
//! timestamps belong to the persisted representation.

use crate::router::Route;
use leetmentor_core::error::PipelineError;
use leetmentor_core::intent::Intent;
use leetmentor_core::message::{Message, Role};

/// The in-pipeline message representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnMessage {
    pub role: Role,
    pub content: String,
}

impl TurnMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Convert to the persisted representation; the timestamp is freshly
    /// generated, which is the accepted lossy part of the round-trip.
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl From<&Message> for TurnMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Where a turn currently is in its linear stage sequence.
///
/// Transitions are validated: no skipping, no revisiting. `End`/`Fallback`
/// routes jump from `Routing` straight to `Done`, which is the one allowed
/// shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classifying,
    Routing,
    Handling,
    Done,
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Classifying => "classifying",
            Stage::Routing => "routing",
            Stage::Handling => "handling",
            Stage::Done => "done",
        }
    }

    /// Validate and perform a transition to `next`.
    pub fn advance(self, next: Stage) -> Result<Stage, PipelineError> {
        let valid = matches!(
            (self, next),
            (Stage::Classifying, Stage::Routing)
                | (Stage::Routing, Stage::Handling)
                | (Stage::Routing, Stage::Done)
                | (Stage::Handling, Stage::Done)
        );
        if valid {
            Ok(next)
        } else {
            Err(PipelineError::InvalidTransition {
                from: self.name(),
                to: next.name(),
            })
        }
    }
}

/// The state of one pipeline turn.
#[derive(Debug, Clone)]
pub struct TurnState {
    /// Working copy of the conversation, append order preserved.
    pub messages: Vec<TurnMessage>,

    /// The label classified during this turn (or carried over from the
    /// session before classification runs).
    pub message_type: Option<Intent>,

    /// The routing decision, set once the router has run.
    pub next: Option<Route>,

    /// Current pipeline stage.
    pub stage: Stage,
}

impl TurnState {
    /// Start a turn from an existing conversation.
    pub fn new(messages: Vec<TurnMessage>, message_type: Option<Intent>) -> Self {
        Self {
            messages,
            message_type,
            next: None,
            stage: Stage::Classifying,
        }
    }

    /// The most recent user message, if any.
    pub fn last_user_message(&self) -> Option<&TurnMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_stage_sequence() {
        let stage = Stage::Classifying;
        let stage = stage.advance(Stage::Routing).unwrap();
        let stage = stage.advance(Stage::Handling).unwrap();
        let stage = stage.advance(Stage::Done).unwrap();
        assert_eq!(stage, Stage::Done);
    }

    #[test]
    fn routing_may_terminate_directly() {
        assert!(Stage::Routing.advance(Stage::Done).is_ok());
    }

    #[test]
    fn skipping_and_revisiting_rejected() {
        assert!(Stage::Classifying.advance(Stage::Handling).is_err());
        assert!(Stage::Classifying.advance(Stage::Done).is_err());
        assert!(Stage::Done.advance(Stage::Classifying).is_err());
        assert!(Stage::Handling.advance(Stage::Routing).is_err());
    }

    #[test]
    fn last_user_message_scans_backwards() {
        let state = TurnState::new(
            vec![
                TurnMessage::user("first"),
                TurnMessage::assistant("reply"),
                TurnMessage::user("second"),
            ],
            None,
        );
        assert_eq!(state.last_user_message().unwrap().content, "second");
    }

    #[test]
    fn round_trip_preserves_role_and_content() {
        let turn = TurnMessage::assistant("Here's the idea.");
        let msg = turn.to_message();
        let back = TurnMessage::from(&msg);
        assert_eq!(back, turn);
    }
}
