//! lineweave - geometric paragraph reconstruction from positioned text lines.
//!
//! Given pages of positioned text-line primitives (bounding box + literal
//! text), reconstructs the logical paragraphs a reader would perceive, in
//! reading order, with cross-page boilerplate removed and page-break
//! continuations stitched back together.

pub mod api;
pub mod converter;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod stitch;
pub mod utils;

pub use api::high_level;
pub use api::high_level::{ExtractOptions, extract_paragraph_records, extract_paragraphs};
pub use converter::ParagraphRecord;
pub use error::{ExtractError, Result};
pub use layout::{Axis, ClusterParams, LinePrimitive, Page, PageObject, ParagraphBox};
