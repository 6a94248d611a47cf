//! Message domain types.
//!
//! These are the value objects that flow through the whole system:
//! User sends a message → gateway loads the session → pipeline classifies,
//! routes, and generates the reply → session persists the updated turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (taxonomy prompt, intent instructions)
    System,
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

/// A single message in a conversation.
///
/// Ordering is positional within `Session::messages`; the timestamp is
/// informational only and is regenerated when a turn is written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Creation time (informational, not used for ordering)
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
