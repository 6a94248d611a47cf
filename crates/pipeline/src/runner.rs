//! Turn runner — executes one classify → route → handle pass.
//!
//! The runner owns the model parameters so callers hand it a `TurnState`
//! and get back the finished state with the reply appended and the label
//! recorded. Any failure aborts the turn before the caller writes anything
//! back, so the persisted session is never partially updated.

use crate::classifier::classify;
use crate::handlers::handle;
use crate::router::{Route, route};
use crate::state::{Stage, TurnState};
use leetmentor_core::error::Result;
use leetmentor_core::provider::Provider;
use std::sync::Arc;
use tracing::info;

/// Executes pipeline turns against a fixed provider and model configuration.
pub struct TurnRunner {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl TurnRunner {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Cap handler completions at `max_tokens`.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Run one full turn. On success the returned state carries the new
    /// assistant reply and the classified label; on failure the input state
    /// is dropped and nothing is persisted.
    pub async fn run_turn(&self, mut state: TurnState) -> Result<TurnState> {
        // Classifying
        let intent = classify(
            self.provider.as_ref(),
            &self.model,
            self.temperature,
            &state,
        )
        .await?;
        state.message_type = Some(intent);
        state.stage = state.stage.advance(Stage::Routing)?;

        // Routing
        let next = route(intent);
        state.next = Some(next);

        match next {
            Route::Handle(intent) => {
                state.stage = state.stage.advance(Stage::Handling)?;

                let reply = handle(
                    self.provider.as_ref(),
                    &self.model,
                    self.temperature,
                    self.max_tokens,
                    intent,
                    &state.messages,
                )
                .await?;
                state.messages.push(reply);
                state.stage = state.stage.advance(Stage::Done)?;
            }
            Route::End | Route::Fallback => {
                // Terminal routes skip handling entirely.
                state.stage = state.stage.advance(Stage::Done)?;
            }
        }

        info!(label = %intent, messages = state.messages.len(), "Pipeline turn complete");
        Ok(state)
    }
}
