//! Entry extraction.
//!
//! A note is a run of entries, each starting at a heading line made of the
//! six-character marker `######` followed by whitespace. Text before the
//! first heading belongs to no entry. An entry's body runs up to (not
//! including) the next heading line or the end of the note.

use std::sync::LazyLock;

use regex::Regex;

/// Heading marker. Must start a line and be followed by whitespace.
pub const HEADING_MARKER: &str = "######";

/// A body with more newlines than this (after trimming) already carries
/// more than a bare link.
const MAX_UNPROCESSED_NEWLINES: usize = 2;

/// `[title](url)` — title on one line, URL with no whitespace or `)`.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(.*?)\]\((https?://[^\s)]+)\)").expect("link pattern is valid")
});

/// One capture selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Heading line including its trailing newline (if the note had one).
    pub header: String,
    /// Everything between the heading line and the next heading.
    pub body: String,
    pub title: String,
    pub url: String,
}

impl Entry {
    /// The exact note text this entry was cut from: `header + body`.
    pub fn raw_span(&self) -> String {
        format!("{}{}", self.header, self.body)
    }
}

/// A heading-delimited slice of the note, before any classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: &'a str,
    pub body: &'a str,
}

/// Whether `line` opens a new entry.
pub(crate) fn is_heading_line(line: &str) -> bool {
    line.strip_prefix(HEADING_MARKER)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Split `content` into (header, body) pairs in document order.
pub fn sections(content: &str) -> Vec<Section<'_>> {
    // Byte offsets of every line start.
    let line_starts = std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .filter(|&i| i < content.len());

    let heading_starts: Vec<usize> = line_starts
        .filter(|&i| is_heading_line(&content[i..]))
        .collect();

    heading_starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = heading_starts.get(n + 1).copied().unwrap_or(content.len());
            let block = &content[start..end];
            let header_len = block.find('\n').map_or(block.len(), |i| i + 1);
            let (header, body) = block.split_at(header_len);
            Section { header, body }
        })
        .collect()
}

/// A body is unprocessed when, trimmed, it spans at most three lines and
/// mentions an http(s) URL somewhere.
pub fn is_unprocessed(body: &str) -> bool {
    let newlines = body.trim().matches('\n').count();
    newlines <= MAX_UNPROCESSED_NEWLINES && (body.contains("http://") || body.contains("https://"))
}

/// Find the first unprocessed entry in document order.
///
/// Entries that pass [`is_unprocessed`] but carry no well-formed
/// `[title](url)` link are skipped and the scan continues.
pub fn find_unprocessed(content: &str) -> Option<Entry> {
    sections(content).into_iter().find_map(|section| {
        if !is_unprocessed(section.body) {
            return None;
        }
        let caps = LINK_RE.captures(section.body.trim())?;
        Some(Entry {
            header: section.header.to_string(),
            body: section.body.to_string(),
            title: caps[1].to_string(),
            url: caps[2].to_string(),
        })
    })
}
