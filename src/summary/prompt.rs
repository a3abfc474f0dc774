//! Summary prompt rendering.
//!
//! The template ships in `config/prompts/capture_summary.txt` and is compiled
//! into the binary. Variables use `{{key}}` syntax:
//!
//! - `{{source}}` — what kind of content follows ("webpage", "video transcript")
//! - `{{content}}` — the text to summarize

use super::Strategy;

pub const SUMMARY_TEMPLATE: &str = include_str!("../../config/prompts/capture_summary.txt");

/// Fill the summary template. `{{source}}` is substituted before
/// `{{content}}` so braces inside page text are never expanded.
pub fn render(strategy: Strategy, content: &str) -> String {
    SUMMARY_TEMPLATE
        .trim()
        .replace("{{source}}", strategy.source_label())
        .replace("{{content}}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_embedded_at_the_end() {
        let prompt = render(Strategy::WebText, "Page body text.");
        assert!(prompt.ends_with("Page body text."));
        assert!(prompt.contains("following webpage content"));
        assert!(prompt.contains("snake_case"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn transcript_source_label() {
        let prompt = render(Strategy::Transcript, "hello");
        assert!(prompt.contains("following video transcript content"));
    }

    #[test]
    fn template_markers_in_content_are_left_alone() {
        let prompt = render(Strategy::WebText, "literal {{source}} in page");
        assert!(prompt.ends_with("literal {{source}} in page"));
    }
}
