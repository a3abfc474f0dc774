//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Everything here is blocking: the processor handles one entry at a time
//! and has nothing else to do while the model is generating.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("error getting summary from Ollama: HTTP {status}")]
    Status { status: u16, body: String },
    #[error("failed to parse provider response: {0}")]
    Decode(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch keeps callers free of trait objects.
/// Adding a backend = new module + new variant + new `generate` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Ollama(providers::ollama::OllamaProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return the raw generated text.
    ///
    /// The text is returned as-is; stripping reasoning markup is the
    /// caller's job.
    pub fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Ollama(p) => p.generate(prompt),
            LlmProvider::Dummy(p) => p.generate(prompt),
        }
    }
}
