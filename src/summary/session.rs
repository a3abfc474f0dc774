//! Lazily-opened web session shared across processing steps.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use super::SummaryError;

const USER_AGENT: &str = concat!("quick-capture/", env!("CARGO_PKG_VERSION"));

/// Owns the HTTP client used to fetch pages.
///
/// Nothing is opened until the first page fetch. [`release`](Self::release)
/// drops the client; it is safe to call repeatedly and runs on drop, so the
/// session is torn down exactly once whichever way the loop exits.
#[derive(Debug)]
pub struct WebSession {
    client: Option<Client>,
    timeout: Option<Duration>,
    opened: usize,
}

impl WebSession {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { client: None, timeout, opened: 0 }
    }

    /// The session's client, opening the session on first use.
    pub fn client(&mut self) -> Result<&Client, SummaryError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let client = Client::builder()
                    .timeout(self.timeout)
                    .user_agent(USER_AGENT)
                    .build()
                    .map_err(|e| SummaryError::Fetch(format!("failed to open web session: {e}")))?;
                self.opened += 1;
                info!("web session opened");
                client
            }
        };
        Ok(&*self.client.insert(client))
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// How many times a client has been created over this session's life.
    pub fn times_opened(&self) -> usize {
        self.opened
    }

    pub fn release(&mut self) {
        if self.client.take().is_some() {
            info!("web session released");
        } else {
            debug!("web session release: nothing open");
        }
    }
}

impl Drop for WebSession {
    fn drop(&mut self) {
        self.release();
    }
}
