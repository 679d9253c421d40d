//! Final assembly: flattens the normalized pages and stitches paragraph
//! continuations across page breaks.
//!
//! The most common page-break artifact is a paragraph whose tail lands at
//! the top of the next page as a separate record. Only the first record of
//! each page is a stitching candidate; records further down a page are
//! never merged with earlier content, and merging never reorders records.

use crate::converter::ParagraphRecord;
use crate::utils::is_printable_ascii;

/// Whether `next` continues `prev`: the previous text must not end in a
/// sentence terminator and the continuation must not start with an
/// uppercase letter. Empty texts never match.
fn should_join(prev: &str, next: &str) -> bool {
    let Some(last) = prev.chars().last() else {
        return false;
    };
    let Some(first) = next.chars().next() else {
        return false;
    };
    !matches!(last, '.' | '!' | '?') && !first.is_uppercase()
}

/// Flattens per-page records into the document's final paragraph sequence,
/// merging page-break continuations. When `only_printable` is set, record
/// text is restricted to printable ASCII first; every record is stripped
/// and empty records are dropped before they can take part in stitching.
pub fn assemble(
    pages: Vec<Vec<ParagraphRecord>>,
    only_printable: bool,
) -> Vec<ParagraphRecord> {
    let mut paragraphs: Vec<ParagraphRecord> = Vec::new();

    for page in pages {
        for (pos, mut record) in page.into_iter().enumerate() {
            if only_printable {
                record.text.retain(is_printable_ascii);
            }
            record.text = record.text.trim().to_string();
            if record.text.is_empty() {
                continue;
            }

            let joins = pos == 0
                && paragraphs
                    .last()
                    .is_some_and(|prev| should_join(&prev.text, &record.text));
            if joins {
                if let Some(prev) = paragraphs.pop() {
                    record.text = format!("{} {}", prev.text, record.text);
                    record.indentation_level = prev.indentation_level;
                }
            }
            paragraphs.push(record);
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_join() {
        assert!(should_join("continued in the next sect", "ion below."));
        assert!(!should_join("A complete sentence.", "and more"));
        assert!(!should_join("continued in the next sect", "Ion below."));
        assert!(!should_join("", "ion below."));
        assert!(!should_join("continued", ""));
    }
}
