//! Strips reasoning artifacts from model output.
//!
//! Passes run in a fixed order; later passes assume the earlier ones ran:
//!
//! 1. `<think>…</think>` blocks, contents included, across lines
//! 2. `[think]…[/think]` blocks, same
//! 3. whole lines starting with `thinking:`
//! 4. runs of blank lines collapsed to one blank line
//! 5. outer whitespace trimmed

use std::sync::LazyLock;

use regex::Regex;

static THINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("think tag pattern is valid"));

static THINK_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[think\].*?\[/think\]").expect("think bracket pattern is valid")
});

static THINKING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^thinking:.*(?:\n|$)").expect("thinking line pattern is valid"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank run pattern is valid"));

pub fn sanitize(raw: &str) -> String {
    let text = THINK_TAG_RE.replace_all(raw, "");
    let text = THINK_BRACKET_RE.replace_all(&text, "");
    let text = THINKING_LINE_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}
