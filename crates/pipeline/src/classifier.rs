//! Message classifier — labels the latest user message with one of the
//! eight canonical intents.
//!
//! The model is prompted with the fixed taxonomy instruction and asked for a
//! label only; the raw completion is normalized through `Intent::parse`, so
//! everything downstream of this module is guaranteed to carry one of the
//! eight exact canonical labels. An out-of-taxonomy answer aborts the turn —
//! a hard failure is preferred over misrouting.

use crate::state::TurnState;
use leetmentor_core::error::{Error, PipelineError};
use leetmentor_core::intent::Intent;
use leetmentor_core::message::Message;
use leetmentor_core::provider::{Provider, ProviderRequest};
use tracing::debug;

/// Labels are a handful of words; cap the completion accordingly.
const CLASSIFIER_MAX_TOKENS: u32 = 64;

/// The fixed taxonomy instruction sent as the system prompt.
pub const CLASSIFIER_INSTRUCTION: &str = r#"You are an expert at classifying user intents based on their messages.
Classify the message into exactly one of the following categories and answer with the category name only, nothing else.

1. LeetCode Question
   - The user is providing a LeetCode question to be stored/acknowledged for later use.
   - Indicators: mentions a LeetCode question number/title and asks to remember/store it; requests only an acknowledgment.

2. Question explanation
   - The user wants the question itself explained.
   - Indicators: "What does this question mean?", "Explain this problem statement", "What is being asked here?"

3. Solution explanation
   - The user wants the thought process of solving the problem explained, covering BOTH a brute-force baseline and an optimized approach.
   - Indicators: "Can you explain the thought process of the solution?", "Walk me through how this solution works?"

4. User explanation correction
   - The user provides their own explanation of a question or solution and wants it corrected or validated.
   - Indicators: "Is my explanation correct?", "Did I understand this properly?"

5. User solution correction
   - The user submits their own solution logic and asks for it to be checked or corrected.
   - Indicators: "Here's my approach — is it correct?", "What's wrong with my approach?"

6. Code the solution as per user req/code correction
   - The user wants new or modified code written to meet specific requirements.
   - Indicators: "Write code for this problem", "Modify my code to do X"

7. Asking user for programming language
   - Clarification about which programming language to use is needed before coding.
   - Indicators: the user asked for code but did not specify a language.

8. User code correction
   - The user provides code with errors and wants it fixed so it runs correctly.
   - Indicators: "My code gives an error", "This doesn't compile/run", "Fix my syntax or logic"

Answer with the exact category name and nothing else."#;

/// Classify the most recent user message in `state`.
///
/// Fails with `EmptyHistory` when no user message exists, and with
/// `UnrecognizedIntent` when the model answers outside the taxonomy.
pub async fn classify(
    provider: &dyn Provider,
    model: &str,
    temperature: f32,
    state: &TurnState,
) -> Result<Intent, Error> {
    let last_user = state
        .last_user_message()
        .ok_or(PipelineError::EmptyHistory)?;

    let request = ProviderRequest {
        model: model.to_string(),
        messages: vec![Message::user(&last_user.content)],
        system: Some(CLASSIFIER_INSTRUCTION.to_string()),
        temperature,
        max_tokens: Some(CLASSIFIER_MAX_TOKENS),
    };

    let response = provider.complete(request).await?;
    let intent = Intent::parse(&response.message.content)?;

    debug!(label = %intent, "Classified user message");
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TurnMessage;
    use crate::test_helpers::SequentialMockProvider;

    #[tokio::test]
    async fn classifies_normalized_label() {
        let provider = SequentialMockProvider::single_text("  question explanation \n");
        let state = TurnState::new(vec![TurnMessage::user("What does this problem ask?")], None);

        let intent = classify(&provider, "mock-model", 0.7, &state).await.unwrap();
        assert_eq!(intent, Intent::QuestionExplanation);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_history_is_a_hard_failure() {
        let provider = SequentialMockProvider::new(vec![]);
        let state = TurnState::new(vec![], None);

        let err = classify(&provider, "mock-model", 0.7, &state)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Pipeline(PipelineError::EmptyHistory)
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn assistant_only_history_counts_as_empty() {
        let provider = SequentialMockProvider::new(vec![]);
        let state = TurnState::new(vec![TurnMessage::assistant("Hello!")], None);

        let err = classify(&provider, "mock-model", 0.7, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Pipeline(PipelineError::EmptyHistory)));
    }

    #[tokio::test]
    async fn out_of_taxonomy_label_rejected() {
        let provider = SequentialMockProvider::single_text("banana");
        let state = TurnState::new(vec![TurnMessage::user("hi")], None);

        let err = classify(&provider, "mock-model", 0.7, &state)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Pipeline(PipelineError::UnrecognizedIntent { .. })
        ));
    }
}
