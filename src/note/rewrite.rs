//! In-place entry rewrite.

use super::entry::{is_heading_line, Entry};

/// Closing rule written after every processed entry.
pub const ENTRY_RULE: &str = "---";

/// The text an entry is replaced with once it has a summary:
/// heading, link, blank line, summary, blank line, rule.
pub fn processed_block(entry: &Entry, summary: &str) -> String {
    format!(
        "{}[{}]({})\n\n{}\n\n{ENTRY_RULE}\n",
        entry.header,
        entry.title,
        entry.url,
        demote_headings(summary)
    )
}

/// Indent summary lines that would otherwise open a new entry. A model
/// heading like `###### Key points` still renders as a heading but no
/// longer splits the entry it was written into.
fn demote_headings(summary: &str) -> String {
    summary
        .split('\n')
        .map(|line| {
            if is_heading_line(line) {
                format!(" {line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the first occurrence of the entry's raw span in `content`.
///
/// Returns `None` when the span is no longer present (the note changed
/// underneath us); the caller decides what to do with that.
pub fn rewrite(content: &str, entry: &Entry, summary: &str) -> Option<String> {
    let span = entry.raw_span();
    content
        .contains(&span)
        .then(|| content.replacen(&span, &processed_block(entry, summary), 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::entry::find_unprocessed;

    #[test]
    fn rewrites_single_entry() {
        let note = "###### 2024-01-01\n[My Link](https://example.com)\n";
        let entry = find_unprocessed(note).unwrap();
        let updated = rewrite(note, &entry, "Summary. #tag").unwrap();
        assert_eq!(
            updated,
            "###### 2024-01-01\n[My Link](https://example.com)\n\nSummary. #tag\n\n---\n"
        );
    }

    #[test]
    fn rewritten_entry_is_never_reselected() {
        let note = "###### a\n[A](https://a.example)\n###### b\n[B](https://b.example)\n";
        let first = find_unprocessed(note).unwrap();
        let once = rewrite(note, &first, "A summary.").unwrap();

        let second = find_unprocessed(&once).unwrap();
        assert_eq!(second.title, "B");

        let twice = rewrite(&once, &second, "").unwrap();
        assert_eq!(find_unprocessed(&twice), None);
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let dup = "###### same\n[X](https://x.example)\n";
        let note = format!("{dup}{dup}");
        let entry = find_unprocessed(&note).unwrap();
        let updated = rewrite(&note, &entry, "S").unwrap();
        assert!(updated.starts_with("###### same\n[X](https://x.example)\n\nS\n\n---\n"));
        assert!(updated.ends_with(dup));
    }

    #[test]
    fn surrounding_text_is_untouched() {
        let note = "preamble\n###### a\n[A](https://a.example)\n###### b\nnotes only\n";
        let entry = find_unprocessed(note).unwrap();
        let updated = rewrite(note, &entry, "S").unwrap();
        assert!(updated.starts_with("preamble\n###### a\n"));
        assert!(updated.ends_with("---\n###### b\nnotes only\n"));
    }

    #[test]
    fn missing_span_returns_none() {
        let entry = find_unprocessed("###### a\n[A](https://a.example)\n").unwrap();
        assert_eq!(rewrite("###### other\n", &entry, "S"), None);
    }

    #[test]
    fn extra_body_text_is_replaced_by_the_block() {
        let note = "###### a\nread later\n[A](https://a.example)\n";
        let entry = find_unprocessed(note).unwrap();
        assert_eq!(
            rewrite(note, &entry, "S").unwrap(),
            "###### a\n[A](https://a.example)\n\nS\n\n---\n"
        );
    }

    #[test]
    fn heading_inside_summary_does_not_split_the_entry() {
        let note = "###### a\n[T](https://t.example)\n";
        let entry = find_unprocessed(note).unwrap();
        let updated = rewrite(note, &entry, "Gist.\n###### Key points\nMore.").unwrap();
        assert_eq!(
            updated,
            "###### a\n[T](https://t.example)\n\nGist.\n ###### Key points\nMore.\n\n---\n"
        );
        assert_eq!(find_unprocessed(&updated), None);
        assert_eq!(crate::note::entry::sections(&updated).len(), 1);
    }

    #[test]
    fn marker_without_whitespace_is_kept_verbatim() {
        let note = "###### a\n[T](https://t.example)\n";
        let entry = find_unprocessed(note).unwrap();
        let updated = rewrite(note, &entry, "#######tag ok").unwrap();
        assert!(updated.contains("\n\n#######tag ok\n\n"));
    }
}
