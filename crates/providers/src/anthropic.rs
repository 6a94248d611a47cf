//! Anthropic native provider implementation.
//!
//! Uses Anthropic's Messages API directly:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//! - Bounded per-request timeout surfaced as `ProviderError::Timeout`

use async_trait::async_trait;
use leetmentor_core::error::ProviderError;
use leetmentor_core::message::{Message, Role};
use leetmentor_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Anthropic native Messages API provider.
pub struct AnthropicProvider {
    name: String,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: build_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each model invocation to the given number of seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.client = build_client(timeout_secs);
        self
    }

    /// Convert messages to Anthropic API format.
    ///
    /// System messages never reach this path (the pipeline sends the system
    /// instruction via `ProviderRequest::system`); if one slips in it is
    /// folded into the system field by `complete` and skipped here.
    fn to_api_messages(messages: &[Message]) -> Vec<AnthropicMessage> {
        messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::System => return None,
                };
                Some(AnthropicMessage {
                    role: role.into(),
                    content: msg.content.clone(),
                })
            })
            .collect()
    }

    /// Combine the request-level system instruction with any system messages
    /// embedded in the history.
    fn effective_system(request: &ProviderRequest) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(sys) = &request.system {
            parts.push(sys);
        }
        for msg in &request.messages {
            if msg.role == Role::System {
                parts.push(&msg.content);
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    fn map_send_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);
        let system = Self::effective_system(&request);
        let api_messages = Self::to_api_messages(&request.messages);

        let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": api_messages,
            "max_tokens": max_tokens,
            "temperature": request.temperature,
        });

        if let Some(ref sys) = system {
            body["system"] = serde_json::json!(sys);
        }

        debug!(provider = "anthropic", model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: AnthropicResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Anthropic response: {e}"),
            })?;

        Self::response_to_provider_response(api_resp)
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        // Try a minimal request to verify API key
        let url = format!("{}/v1/messages", self.base_url);
        let body = serde_json::json!({
            "model": "claude-3-5-haiku-20241022",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": 1,
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        // 200 = works, 401 = bad key, anything else = reachable but error
        Ok(response.status().is_success() || response.status().as_u16() != 401)
    }
}

impl AnthropicProvider {
    /// Convert an Anthropic API response to our ProviderResponse.
    fn response_to_provider_response(
        resp: AnthropicResponse,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let mut text_content = String::new();

        for block in &resp.content {
            match block {
                ResponseContentBlock::Text { text } => {
                    if !text_content.is_empty() {
                        text_content.push('\n');
                    }
                    text_content.push_str(text);
                }
                ResponseContentBlock::Other => {}
            }
        }

        let usage = Some(Usage {
            prompt_tokens: resp.usage.input_tokens,
            completion_tokens: resp.usage.output_tokens,
            total_tokens: resp.usage.input_tokens + resp.usage.output_tokens,
        });

        Ok(ProviderResponse {
            message: Message::assistant(text_content),
            usage,
            model: resp.model,
        })
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ResponseContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let provider = AnthropicProvider::new("sk-ant-test");
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn constructor_with_base_url() {
        let provider =
            AnthropicProvider::new("sk-ant-test").with_base_url("https://custom.proxy.com/");
        assert_eq!(provider.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn message_conversion_skips_system() {
        let messages = vec![
            Message::system("You are a tutor"),
            Message::user("Hello"),
            Message::assistant("Hi!"),
        ];
        let api_msgs = AnthropicProvider::to_api_messages(&messages);
        assert_eq!(api_msgs.len(), 2);
        assert_eq!(api_msgs[0].role, "user");
        assert_eq!(api_msgs[1].role, "assistant");
    }

    #[test]
    fn effective_system_merges_request_and_history() {
        let request = ProviderRequest::new(
            "m",
            vec![Message::system("Be concise"), Message::user("Hello")],
        )
        .with_system("You are a tutor");

        let system = AnthropicProvider::effective_system(&request);
        assert_eq!(system.as_deref(), Some("You are a tutor\n\nBe concise"));
    }

    #[test]
    fn effective_system_none_without_instructions() {
        let request = ProviderRequest::new("m", vec![Message::user("Hello")]);
        assert!(AnthropicProvider::effective_system(&request).is_none());
    }

    #[test]
    fn parse_text_response() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-3-5-haiku-20241022",
                "content": [{"type": "text", "text": "Two Sum"}],
                "usage": {"input_tokens": 10, "output_tokens": 5},
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        let pr = AnthropicProvider::response_to_provider_response(resp).unwrap();
        assert_eq!(pr.message.content, "Two Sum");
        assert_eq!(pr.message.role, Role::Assistant);
        assert_eq!(pr.usage.unwrap().total_tokens, 15);
        assert_eq!(pr.model, "claude-3-5-haiku-20241022");
    }

    #[test]
    fn parse_response_ignores_unknown_blocks() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{
                "model": "claude-3-5-haiku-20241022",
                "content": [
                    {"type": "thinking", "thinking": "hmm"},
                    {"type": "text", "text": "Answer."}
                ],
                "usage": {"input_tokens": 15, "output_tokens": 25}
            }"#,
        )
        .unwrap();

        let pr = AnthropicProvider::response_to_provider_response(resp).unwrap();
        assert_eq!(pr.message.content, "Answer.");
    }
}
