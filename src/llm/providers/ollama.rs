//! Ollama `/api/generate` provider.
//!
//! One blocking round-trip per call, streaming disabled. All wire types are
//! private to this module.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::ProviderError;

/// Adapter for an Ollama server (or anything speaking its generate API).
///
/// Constructed once at startup, then cheaply cloned because the underlying
/// client is reference-counted.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    generate_url: String,
    model: String,
}

impl OllamaProvider {
    /// `endpoint` is the server base URL, e.g. `http://localhost:11434`.
    /// `timeout_seconds = None` leaves requests without a client-side timeout.
    pub fn new(
        endpoint: &str,
        model: &str,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout_seconds.map(Duration::from_secs))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            generate_url: generate_url(endpoint),
            model: model.to_string(),
        })
    }

    pub fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generate request");
        trace!(prompt = %prompt, "full prompt");

        let response = self
            .client
            .post(&self.generate_url)
            .json(&payload)
            .send()
            .map_err(|e| {
                error!(url = %self.generate_url, error = %e, "generate request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            error!(%status, body = %body, "generate request returned non-200");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<GenerateResponse>().map_err(|e| {
            error!(error = %e, "failed to deserialize generate response");
            ProviderError::Decode(e.to_string())
        })?;

        debug!(response_len = parsed.response.len(), "received generate response");
        Ok(parsed.response)
    }
}

fn generate_url(endpoint: &str) -> String {
    format!("{}/api/generate", endpoint.trim_end_matches('/'))
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
