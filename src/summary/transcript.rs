//! Transcript backend: video/social links.
//!
//! Runs the external transcription tool as a blocking subprocess, reads the
//! transcript it leaves in the output directory, and asks the model to
//! summarize it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::config::Config;
use crate::llm::LlmProvider;

use super::{prompt, Strategy, SummaryError};

/// File the transcription tool must write inside the output directory.
pub const TRANSCRIPT_FILE: &str = "out.txt";

#[derive(Debug, Clone)]
pub struct TranscriptBackend {
    tool: PathBuf,
    output_dir: PathBuf,
    device: String,
}

impl TranscriptBackend {
    pub fn new(tool: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, device: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            output_dir: output_dir.into(),
            device: device.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.paths.transcribe_tool,
            &config.paths.output_dir,
            &config.processing.transcribe_device,
        )
    }

    pub fn transcript_path(&self) -> PathBuf {
        self.output_dir.join(TRANSCRIPT_FILE)
    }

    /// Run the tool for `url` and return the transcript text.
    pub fn transcribe(&self, url: &str) -> Result<String, SummaryError> {
        fs::create_dir_all(&self.output_dir)?;

        // A transcript left by an earlier run must not pass for this one.
        let out = self.transcript_path();
        remove_stale(&out)?;

        info!(tool = %self.tool.display(), url = %url, "running transcription tool");
        let status = Command::new(&self.tool)
            .arg(url)
            .arg("--output_dir")
            .arg(&self.output_dir)
            .args(["--language", "en", "--device"])
            .arg(&self.device)
            .status()
            .map_err(|e| self.failed(e.to_string()))?;

        if !status.success() {
            return Err(self.failed(format!("exited with {status}")));
        }

        if !out.exists() {
            return Err(SummaryError::TranscriptionMissing { path: out });
        }

        let transcript = fs::read_to_string(&out)?;
        debug!(chars = transcript.chars().count(), "transcript read");
        Ok(transcript)
    }

    /// Transcribe, then summarize. Returns the raw model output.
    pub fn summarize(&self, llm: &LlmProvider, url: &str) -> Result<String, SummaryError> {
        let transcript = self.transcribe(url)?;
        let prompt = prompt::render(Strategy::Transcript, &transcript);
        Ok(llm.generate(&prompt)?)
    }

    fn failed(&self, reason: String) -> SummaryError {
        SummaryError::TranscriptionFailed {
            tool: self.tool.display().to_string(),
            reason,
        }
    }
}

fn remove_stale(path: &Path) -> Result<(), SummaryError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale transcript");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
