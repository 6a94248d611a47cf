//! Shared test helpers for pipeline tests.

use leetmentor_core::error::ProviderError;
use leetmentor_core::message::Message;
use leetmentor_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::sync::Mutex;

/// A mock provider that returns a sequence of scripted outcomes.
///
/// Each call to `complete` returns the next outcome in the queue.
/// Panics if more calls are made than outcomes provided.
pub struct SequentialMockProvider {
    outcomes: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    call_count: Mutex<usize>,
}

impl SequentialMockProvider {
    pub fn new(outcomes: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            call_count: Mutex::new(0),
        }
    }

    /// A provider that returns a single text response.
    pub fn single_text(text: &str) -> Self {
        Self::texts(&[text])
    }

    /// A provider that returns the given texts in order.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(Self::text_response(t))).collect())
    }

    /// A provider whose first call fails with `err`.
    pub fn failing(err: ProviderError) -> Self {
        Self::new(vec![Err(err)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// A simple text response.
    pub fn text_response(text: &str) -> ProviderResponse {
        ProviderResponse {
            message: Message::assistant(text),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let outcomes = self.outcomes.lock().unwrap();

        if *count >= outcomes.len() {
            panic!(
                "SequentialMockProvider: no more outcomes (call #{}, have {})",
                *count,
                outcomes.len()
            );
        }

        let outcome = outcomes[*count].clone();
        *count += 1;
        outcome
    }
}
