//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the processor consumes.
//! Raw YAML deserialization types live in `raw.rs`.

use std::path::PathBuf;
use std::time::Duration;

/// File-system locations (`paths:` section).
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// The quick-capture note that gets rewritten in place.
    pub note_path: PathBuf,
    /// Executable name or path of the transcription tool.
    pub transcribe_tool: PathBuf,
    /// Directory the transcription tool writes `out.txt` into.
    pub output_dir: PathBuf,
}

/// Inference endpoint settings (`api:` section).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; `/api/generate` is appended per request.
    pub ollama_endpoint: String,
    /// Model identifier sent in every request body.
    pub model: String,
    /// Per-request HTTP timeout. `None` leaves requests unbounded.
    pub timeout_seconds: Option<u64>,
}

/// Loop pacing and backend knobs (`processing:` section).
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Pause between two processed entries.
    pub courtesy_interval: Duration,
    /// Value passed to the transcription tool's `--device` flag.
    pub transcribe_device: String,
    /// Number of characters of page text sent to the model.
    pub web_text_limit: usize,
}

/// Fully-resolved configuration. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    pub api: ApiConfig,
    pub processing: ProcessingConfig,
    pub log_level: String,
    /// File the values were read from; `None` when it was missing and
    /// every key took its default.
    pub loaded_from: Option<PathBuf>,
}
