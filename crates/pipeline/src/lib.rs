//! The message pipeline — one classify → route → handle turn.
//!
//! A turn is a single linear pass: the classifier labels the latest user
//! message, the router picks the handler for that label, the handler pairs a
//! fixed instruction with the conversation history and produces exactly one
//! reply. There are no cycles, no retries, and no intermediate states; the
//! stage sequence is validated explicitly in [`state::Stage`].

pub mod classifier;
pub mod handlers;
pub mod router;
pub mod runner;
pub mod state;

pub use classifier::classify;
pub use handlers::{handle, instruction};
pub use router::{Route, route, route_label};
pub use runner::TurnRunner;
pub use state::{Stage, TurnMessage, TurnState};

#[cfg(test)]
pub(crate) mod test_helpers;
