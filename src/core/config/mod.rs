//! Configuration loading.
//!
//! Reads `config.yaml` relative to the current working directory (or the
//! path given with `-f`), substitutes a default for every key that is absent
//! or `null`, then applies the `QUICK_CAPTURE_LOG_LEVEL` env override.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `PathsConfig`, …).
//! - **raw** — Raw YAML deserialization types; every leaf optional.
//! - **load** — Loading logic: `load`, `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from, DEFAULT_CONFIG_PATH};
pub use types::*;

impl Config {
    /// Safe `Config` for tests — everything rooted in `work_dir`, no pacing,
    /// endpoint pointing at a closed port.
    pub fn test_default(work_dir: &std::path::Path) -> Self {
        Self {
            paths: PathsConfig {
                note_path: work_dir.join("quick_capture.md"),
                transcribe_tool: std::path::PathBuf::from("true"),
                output_dir: work_dir.join("transcription_output"),
            },
            api: ApiConfig {
                ollama_endpoint: "http://127.0.0.1:9".into(),
                model: "test-model".into(),
                timeout_seconds: Some(5),
            },
            processing: ProcessingConfig {
                courtesy_interval: std::time::Duration::ZERO,
                transcribe_device: "cpu".into(),
                web_text_limit: raw::default_web_text_limit(),
            },
            log_level: "info".into(),
            loaded_from: None,
        }
    }
}
