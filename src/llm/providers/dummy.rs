//! Dummy LLM provider — echoes the prompt back prefixed with `[echo]`.
//! Used to exercise the summarizer without an inference server.

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        Ok(format!("[echo] {prompt}"))
    }
}
