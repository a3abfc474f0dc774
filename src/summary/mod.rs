//! Turning a captured link into summary text.
//!
//! [`classify`] picks a [`Strategy`]; the [`Summarizer`] runs the matching
//! backend, sanitizes what the model returned, and hands back a
//! [`SummaryOutcome`]. Backend failures are folded into the outcome rather
//! than returned as errors, so one bad link never stops the loop.

pub mod classify;
pub mod error;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod transcript;
pub mod web;

use std::fmt;
use std::time::Duration;

use tracing::{error, info};

use crate::config::Config;
use crate::llm::LlmProvider;

pub use classify::classify;
pub use error::SummaryError;
pub use sanitize::sanitize;
pub use session::WebSession;
pub use transcript::TranscriptBackend;
pub use web::WebTextBackend;

/// Which backend a link is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Video/social links: transcribe first, then summarize the transcript.
    Transcript,
    /// Everything else: summarize the page's visible text.
    WebText,
}

impl Strategy {
    /// How the content is described to the model.
    pub fn source_label(self) -> &'static str {
        match self {
            Strategy::Transcript => "video transcript",
            Strategy::WebText => "webpage",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Transcript => "transcript",
            Strategy::WebText => "web-text",
        })
    }
}

/// Result of summarizing one link.
#[derive(Debug)]
pub enum SummaryOutcome {
    /// Sanitized model output.
    Summary(String),
    /// The backend gave up; the error is kept so callers can match on it.
    Failed { strategy: Strategy, error: SummaryError },
}

impl SummaryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SummaryOutcome::Failed { .. })
    }

    /// Text to write under the entry's link. Failures are written too, as a
    /// readable error line, which also marks the entry as handled.
    pub fn into_note_text(self) -> String {
        match self {
            SummaryOutcome::Summary(text) => text,
            SummaryOutcome::Failed { strategy: Strategy::Transcript, error } => {
                format!("Error processing transcript content: {error}")
            }
            SummaryOutcome::Failed { strategy: Strategy::WebText, error } => {
                format!("Error summarizing webpage: {error}")
            }
        }
    }
}

/// Owns the model client and both backends, including the lazily-opened
/// web session.
#[derive(Debug)]
pub struct Summarizer {
    llm: LlmProvider,
    transcript: TranscriptBackend,
    web: WebTextBackend,
}

impl Summarizer {
    pub fn new(llm: LlmProvider, transcript: TranscriptBackend, web: WebTextBackend) -> Self {
        Self { llm, transcript, web }
    }

    pub fn from_config(config: &Config, llm: LlmProvider) -> Self {
        let session = WebSession::new(config.api.timeout_seconds.map(Duration::from_secs));
        Self::new(
            llm,
            TranscriptBackend::from_config(config),
            WebTextBackend::new(session, config.processing.web_text_limit),
        )
    }

    pub fn summarize(&mut self, strategy: Strategy, url: &str) -> SummaryOutcome {
        let result = match strategy {
            Strategy::Transcript => self.transcript.summarize(&self.llm, url),
            Strategy::WebText => self.web.summarize(&self.llm, url),
        };

        match result {
            Ok(raw) => {
                let summary = sanitize(&raw);
                info!(%strategy, url = %url, chars = summary.chars().count(), "summary generated");
                SummaryOutcome::Summary(summary)
            }
            Err(error) => {
                error!(%strategy, url = %url, error = %error, "summary backend failed");
                SummaryOutcome::Failed { strategy, error }
            }
        }
    }

    pub fn session(&self) -> &WebSession {
        self.web.session()
    }

    pub fn release_session(&mut self) {
        self.web.release_session();
    }
}
