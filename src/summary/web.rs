//! Web-text backend: generic pages.
//!
//! Fetches the page through the shared [`WebSession`], reduces the HTML to
//! its visible text, and asks the model to summarize a fixed-length prefix.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::llm::LlmProvider;

use super::session::WebSession;
use super::{prompt, Strategy, SummaryError};

/// Elements whose text never reaches the prompt.
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug)]
pub struct WebTextBackend {
    session: WebSession,
    text_limit: usize,
}

impl WebTextBackend {
    pub fn new(session: WebSession, text_limit: usize) -> Self {
        Self { session, text_limit }
    }

    pub fn session(&self) -> &WebSession {
        &self.session
    }

    pub fn release_session(&mut self) {
        self.session.release();
    }

    /// GET the page and return its normalized visible text.
    pub fn fetch_text(&mut self, url: &str) -> Result<String, SummaryError> {
        let client = self.session.client()?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| SummaryError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::Fetch(format!("HTTP {status} for {url}")));
        }

        let html = response
            .text()
            .map_err(|e| SummaryError::Fetch(format!("failed to read body: {e}")))?;
        let text = html_to_text(&html);
        debug!(html_len = html.len(), text_chars = text.chars().count(), "page text extracted");
        Ok(text)
    }

    /// Fetch, truncate, summarize. Returns the raw model output.
    pub fn summarize(&mut self, llm: &LlmProvider, url: &str) -> Result<String, SummaryError> {
        let text = self.fetch_text(url)?;
        let excerpt = truncate_chars(&text, self.text_limit);
        let prompt = prompt::render(Strategy::WebText, excerpt);
        Ok(llm.generate(&prompt)?)
    }
}

/// Visible text of an HTML document, whitespace-normalized.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    normalize_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// Trim every line, split lines on double spaces, drop empty pieces and
/// join the rest with single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `limit` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_script_and_style() {
        let html = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Test Page</title><style>body { color: red; }</style></head>
        <body>
            <script>alert('ignore me')</script>
            <h1>Hello World</h1>
            <p>This is a   test paragraph.</p>
        </body>
        </html>
        "#;
        let text = html_to_text(html);
        assert_eq!(text, "Test Page Hello World This is a test paragraph.");
    }

    #[test]
    fn normalizes_blank_runs_and_double_spaces() {
        assert_eq!(normalize_whitespace("  a  \n\n\n   b  c\n\t d \n"), "a b c d");
        assert_eq!(normalize_whitespace("one two"), "one two");
        assert_eq!(normalize_whitespace("\n \n"), "");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 2000), "short");
        assert_eq!(truncate_chars("", 5), "");
        let long = "x".repeat(2500);
        assert_eq!(truncate_chars(&long, 2000).len(), 2000);
    }

    #[test]
    fn unreachable_page_is_fetch_error_and_opens_session() {
        let mut backend = WebTextBackend::new(WebSession::new(Some(std::time::Duration::from_secs(2))), 2000);
        let err = backend.fetch_text("http://127.0.0.1:9/").unwrap_err();
        assert!(matches!(err, SummaryError::Fetch(_)));
        assert!(backend.session().is_open());
        backend.release_session();
        assert!(!backend.session().is_open());
    }
}
