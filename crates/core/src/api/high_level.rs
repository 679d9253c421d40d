//! High-level paragraph extraction API.
//!
//! - `extract_paragraphs()` - the final paragraph sequence as plain strings
//! - `extract_paragraph_records()` - records with position metadata
//!
//! Per-page clustering and rendering fan out over a rayon pool; the
//! cross-page steps (normalization, stitching) run strictly after the join
//! barrier, on the materialized per-page results.

use std::time::Duration;

use rayon::prelude::*;

use crate::api::guard::{self, CancelFlag};
use crate::converter::{ParagraphRecord, render_page};
use crate::error::{ExtractError, Result};
use crate::layout::{ClusterParams, Page};
use crate::normalize::normalize_document;
use crate::stitch::assemble;

/// Options for paragraph extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Clustering parameters.
    pub params: ClusterParams,

    /// Hard wall-clock budget for the whole pipeline. None runs to
    /// completion on the calling thread.
    pub timeout: Option<Duration>,

    /// Restrict output text to printable ASCII.
    pub only_printable: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            params: ClusterParams::default(),
            timeout: None,
            only_printable: true,
        }
    }
}

/// Reconstructs the document's paragraphs as plain strings, in reading
/// order.
///
/// # Example
/// ```
/// use lineweave_core::high_level::{ExtractOptions, extract_paragraphs};
/// use lineweave_core::layout::{LinePrimitive, Page};
///
/// let page = Page::from_lines(vec![
///     LinePrimitive::horizontal((72.0, 700.0, 340.0, 712.0), "A first line of"),
///     LinePrimitive::horizontal((72.0, 686.0, 310.0, 698.0), "a short paragraph."),
/// ]);
/// let paragraphs = extract_paragraphs(&[page], &ExtractOptions::default()).unwrap();
/// assert_eq!(paragraphs, vec!["A first line of a short paragraph."]);
/// ```
pub fn extract_paragraphs(pages: &[Page], options: &ExtractOptions) -> Result<Vec<String>> {
    let records = extract_paragraph_records(pages, options)?;
    Ok(records.into_iter().map(|r| r.text).collect())
}

/// Reconstructs the document's paragraphs as records carrying position
/// metadata alongside the text.
pub fn extract_paragraph_records(
    pages: &[Page],
    options: &ExtractOptions,
) -> Result<Vec<ParagraphRecord>> {
    match options.timeout {
        Some(limit) => guard::run_with_deadline(pages, options, limit),
        None => run_pipeline(pages, options, &CancelFlag::default()),
    }
}

/// The full pipeline: parallel per-page cluster + render, join, then the
/// sequential cross-page steps. The cancel flag is checked at page
/// granularity and between stages; a cancelled run reports Timeout, which
/// the deadline guard has already returned to the caller.
pub(crate) fn run_pipeline(
    pages: &[Page],
    options: &ExtractOptions,
    cancel: &CancelFlag,
) -> Result<Vec<ParagraphRecord>> {
    let rendered: Vec<Result<Vec<ParagraphRecord>>> = pages
        .par_iter()
        .enumerate()
        .map(|(page_num, page)| {
            if cancel.is_set() {
                return Err(ExtractError::Timeout);
            }
            render_page(&options.params, page_num, page)
        })
        .collect();

    let mut page_records = Vec::with_capacity(rendered.len());
    for result in rendered {
        page_records.push(result?);
    }

    if cancel.is_set() {
        return Err(ExtractError::Timeout);
    }
    normalize_document(&mut page_records);
    Ok(assemble(page_records, options.only_printable))
}
