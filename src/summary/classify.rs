//! Picks a summarization strategy from a link.

use url::Url;

use super::Strategy;

/// Hosts whose links are audio/video and need a transcript first.
/// Checked in this order; the first fragment found wins.
pub const TRANSCRIPT_DOMAINS: [&str; 2] = ["instagram.com", "youtube.com"];

/// The transcript domain fragment `url` matches, if any.
///
/// The host is compared case-insensitively. Links that do not parse, or
/// parse without a host, fall back to searching the whole link text.
pub fn matched_domain(url: &str) -> Option<&'static str> {
    let haystack = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_else(|| url.to_ascii_lowercase());

    TRANSCRIPT_DOMAINS
        .iter()
        .copied()
        .find(|domain| haystack.contains(domain))
}

pub fn classify(url: &str) -> Strategy {
    match matched_domain(url) {
        Some(_) => Strategy::Transcript,
        None => Strategy::WebText,
    }
}
