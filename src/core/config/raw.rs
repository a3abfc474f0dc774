//! Raw YAML deserialization types.
//!
//! These structs mirror the file shape. Every leaf is optional so that a key
//! which is absent or explicitly `null` leaves the default in place; the
//! `load` module resolves them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw YAML shape — serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub paths: RawPaths,
    #[serde(default)]
    pub api: RawApi,
    #[serde(default)]
    pub processing: RawProcessing,
    #[serde(default)]
    pub logging: RawLogging,
}

#[derive(Deserialize, Default)]
pub(super) struct RawPaths {
    pub quick_capture: Option<String>,
    pub transcribe_script: Option<String>,
    pub output_dir: Option<String>,
}

#[derive(Deserialize, Default)]
pub(super) struct RawApi {
    pub ollama_endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Deserialize, Default)]
pub(super) struct RawProcessing {
    pub courtesy_interval_secs: Option<u64>,
    pub transcribe_device: Option<String>,
    pub web_text_limit: Option<usize>,
}

#[derive(Deserialize, Default)]
pub(super) struct RawLogging {
    pub level: Option<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_quick_capture() -> String { "quick_capture/quick_capture.md".to_string() }
pub(super) fn default_transcribe_script() -> String { "transcribe-anything".to_string() }
pub(super) fn default_output_dir() -> String { "transcription_output".to_string() }
pub(super) fn default_ollama_endpoint() -> String { "http://localhost:11434".to_string() }
pub(super) fn default_model() -> String { "deepseek-r1:8b".to_string() }
pub(super) fn default_courtesy_interval_secs() -> u64 { 2 }
pub(super) fn default_transcribe_device() -> String { "insane".to_string() }
pub(super) fn default_web_text_limit() -> usize { 2000 }
pub(super) fn default_log_level() -> String { "info".to_string() }
