//! LLM provider implementations.
//!
//! `build(api)` is the factory — called once at startup.

pub mod dummy;
pub mod ollama;

use crate::config::ApiConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct the configured provider.
pub fn build(api: &ApiConfig) -> Result<LlmProvider, ProviderError> {
    let p = ollama::OllamaProvider::new(&api.ollama_endpoint, &api.model, api.timeout_seconds)?;
    Ok(LlmProvider::Ollama(p))
}
