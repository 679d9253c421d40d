//! Cross-page normalization: boilerplate removal, non-prose filtering, and
//! whitespace normalization over the whole document's records.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::converter::ParagraphRecord;
use crate::utils::is_printable_ascii;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes all pages' records in place. Order-preserving: dropped records
/// are removed from the sequence without reordering survivors.
pub fn normalize_document(pages: &mut [Vec<ParagraphRecord>]) {
    drop_redundant(pages);
    drop_non_prose(pages);
    for page in pages.iter_mut() {
        for record in page.iter_mut() {
            record.text = collapse_whitespace(&record.text);
        }
    }
}

/// Drops every record whose exact text occurs more than once in the
/// document. Text repeated across pages is running header/footer/watermark
/// noise; a legitimately repeated short body phrase is indistinguishable
/// from boilerplate and is dropped with it.
fn drop_redundant(pages: &mut [Vec<ParagraphRecord>]) {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for page in pages.iter() {
        for record in page {
            *counts.entry(record.text.clone()).or_default() += 1;
        }
    }

    let mut dropped = 0usize;
    for page in pages.iter_mut() {
        page.retain(|record| {
            let redundant = counts.get(&record.text).copied().unwrap_or(0) > 1;
            if redundant {
                dropped += 1;
            }
            !redundant
        });
    }
    if dropped > 0 {
        debug!("dropped {dropped} redundant records");
    }
}

/// Drops records that are not prose: after restricting to printable ASCII
/// and stripping, ASCII letters must make up more than half of the
/// remaining characters. Page numbers, running numerals, and isolated
/// symbols fail this; so does anything left empty.
fn drop_non_prose(pages: &mut [Vec<ParagraphRecord>]) {
    for page in pages.iter_mut() {
        page.retain(|record| is_prose(&record.text));
    }
}

fn is_prose(text: &str) -> bool {
    let stripped: String = text.chars().filter(|&c| is_printable_ascii(c)).collect();
    let stripped_len = stripped.trim().chars().count();
    let letters = text.chars().filter(char::is_ascii_alphabetic).count();
    letters as f64 > 0.5 * stripped_len as f64
}

/// Collapses whitespace runs, including embedded line breaks from the
/// extraction layer, into single spaces. Idempotent.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prose() {
        assert!(!is_prose("42"));
        assert!(!is_prose(""));
        assert!(!is_prose("   "));
        assert!(!is_prose("§ 3.1.4"));
        assert!(is_prose("Results are shown in Table 4"));
    }

    #[test]
    fn test_collapse_whitespace_idempotent() {
        let once = collapse_whitespace("a\t b\n\nc   d");
        assert_eq!(once, "a b c d");
        assert_eq!(collapse_whitespace(&once), once);
    }
}
