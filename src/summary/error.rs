//! Failures a summary backend can hit.
//!
//! These never escape the backend boundary as errors: the summarizer folds
//! them into [`SummaryOutcome::Failed`](super::SummaryOutcome) so the loop
//! keeps going.

use std::path::PathBuf;

use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("transcription tool {tool} failed: {reason}")]
    TranscriptionFailed { tool: String, reason: String },

    #[error("Transcription output not found at {}", path.display())]
    TranscriptionMissing { path: PathBuf },

    #[error(transparent)]
    Backend(#[from] ProviderError),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
