//! LLM provider implementations for LeetMentor.
//!
//! All providers implement the `leetmentor_core::Provider` trait.

pub mod anthropic;

pub use anthropic::AnthropicProvider;

use leetmentor_core::provider::Provider;
use std::sync::Arc;

/// Build the provider from configuration.
///
/// Returns `None` when no API key is available (the caller decides whether
/// that is fatal; the gateway refuses to start without one).
pub fn build_from_config(config: &leetmentor_config::AppConfig) -> Option<Arc<dyn Provider>> {
    let api_key = config.api_key.clone()?;

    let mut provider =
        AnthropicProvider::new(api_key).with_timeout(config.provider.timeout_secs);
    if let Some(base_url) = &config.provider.base_url {
        provider = provider.with_base_url(base_url);
    }

    Some(Arc::new(provider))
}
