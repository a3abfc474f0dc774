//! The processing loop.
//!
//! One entry per step: read the note, find the first unprocessed entry,
//! summarize its link, write the summary back, pause, repeat. The loop ends
//! when no unprocessed entry is left or a step fails; either way the web
//! session is released before [`ProcessingLoop::run`] returns.

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm::{providers, ProviderError};
use crate::note::{find_unprocessed, rewrite, NoteFile};
use crate::summary::{classify, Summarizer};

/// A failure that ends the loop. Backend failures are not in here: those
/// are written into the note and processing continues.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("cannot read note {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write note {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An entry was rewritten. `failed` is set when the text written is a
    /// backend error rather than a summary.
    Processed { title: String, failed: bool },
    /// The entry changed while its summary was being generated; nothing
    /// was written.
    Stale { title: String },
    /// No unprocessed entry is left.
    Done,
}

/// Totals for one [`ProcessingLoop::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Entries rewritten, failures included.
    pub processed: usize,
    /// Of those, entries whose written text is a backend error.
    pub failed: usize,
    /// Why the loop stopped early, if it did.
    pub halted: Option<String>,
}

pub struct ProcessingLoop {
    note: NoteFile,
    summarizer: Summarizer,
    courtesy_interval: Duration,
}

impl ProcessingLoop {
    pub fn new(note: NoteFile, summarizer: Summarizer, courtesy_interval: Duration) -> Self {
        Self { note, summarizer, courtesy_interval }
    }

    /// Wire up the note, model client and backends from config.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let llm = providers::build(&config.api)?;
        Ok(Self::new(
            NoteFile::new(&config.paths.note_path),
            Summarizer::from_config(config, llm),
            config.processing.courtesy_interval,
        ))
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Process entries until none is left or a step fails.
    ///
    /// Never returns an error: a failing step is logged and recorded in
    /// [`RunReport::halted`]. The web session is released on every path.
    pub fn run(&mut self) -> RunReport {
        let mut report = RunReport::default();
        let outcome = self.drive(&mut report);
        self.summarizer.release_session();

        if let Err(e) = outcome {
            error!(error = %e, "processing halted");
            report.halted = Some(e.to_string());
        }
        info!(
            processed = report.processed,
            failed = report.failed,
            halted = report.halted.is_some(),
            "processing finished"
        );
        report
    }

    fn drive(&mut self, report: &mut RunReport) -> Result<(), LoopError> {
        loop {
            match self.step()? {
                Step::Done => return Ok(()),
                Step::Stale { .. } => continue,
                Step::Processed { failed, .. } => {
                    report.processed += 1;
                    if failed {
                        report.failed += 1;
                    }
                    if !self.courtesy_interval.is_zero() {
                        thread::sleep(self.courtesy_interval);
                    }
                }
            }
        }
    }

    /// Run one step against the note as it is on disk right now.
    pub fn step(&mut self) -> Result<Step, LoopError> {
        let content = self.read_note()?;
        let Some(entry) = find_unprocessed(&content) else {
            info!("no more unprocessed entries");
            return Ok(Step::Done);
        };

        let strategy = classify(&entry.url);
        info!(title = %entry.title, url = %entry.url, %strategy, "processing entry");

        let outcome = self.summarizer.summarize(strategy, &entry.url);
        let failed = outcome.is_failure();
        let text = outcome.into_note_text();

        // Summaries take a while; pick up anything captured in the meantime.
        let current = self.read_note()?;
        let Some(updated) = rewrite(&current, &entry, &text) else {
            warn!(title = %entry.title, "entry changed while summarizing, not written");
            return Ok(Step::Stale { title: entry.title });
        };

        self.note.write(&updated).map_err(|source| LoopError::Write {
            path: self.note.path().to_path_buf(),
            source,
        })?;
        info!(title = %entry.title, failed, "processed and saved");
        Ok(Step::Processed { title: entry.title, failed })
    }

    fn read_note(&self) -> Result<String, LoopError> {
        self.note.read().map_err(|source| LoopError::Read {
            path: self.note.path().to_path_buf(),
            source,
        })
    }
}
