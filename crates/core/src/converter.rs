//! Page rendering: walks a page's object tree, clusters each container
//! scope, and converts the collected paragraph boxes into ordered records.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::layout::{ClusterParams, LinePrimitive, Page, PageObject, group_lines};
use crate::utils::{HasBBox, Rect};

/// The externally emitted representation of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    pub text: String,
    pub bbox: Rect,
    pub page_num: usize,
    pub indentation_level: i32,
}

fn validate_line(page_num: usize, line: &LinePrimitive) -> Result<()> {
    let (x0, y0, x1, y1) = line.bbox();
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return Err(ExtractError::MalformedInput {
            page: page_num,
            reason: format!("non-finite bbox ({x0}, {y0}, {x1}, {y1})"),
        });
    }
    if x1 < x0 || y1 < y0 {
        return Err(ExtractError::MalformedInput {
            page: page_num,
            reason: format!("inverted bbox ({x0}, {y0}, {x1}, {y1})"),
        });
    }
    Ok(())
}

/// Clusters the direct-child lines of one container scope, then recurses
/// into nested containers, collecting boxes at every depth.
fn collect_boxes(
    params: &ClusterParams,
    page_num: usize,
    objects: &[PageObject],
    out: &mut Vec<crate::layout::ParagraphBox>,
) -> Result<()> {
    let mut lines = Vec::new();
    for obj in objects {
        if let PageObject::Line(line) = obj {
            validate_line(page_num, line)?;
            lines.push(line.clone());
        }
    }
    out.extend(group_lines(params, lines));

    for obj in objects {
        if let PageObject::Group { children, .. } = obj {
            collect_boxes(params, page_num, children, out)?;
        }
    }
    Ok(())
}

/// Renders one page into paragraph records in reading order.
///
/// Reading order is top of page first (descending vertical position), with
/// the y coordinate truncated to integer granularity so floating-point
/// jitter cannot produce false tie-breaks; the stable sort preserves
/// traversal order among exact ties.
pub fn render_page(
    params: &ClusterParams,
    page_num: usize,
    page: &Page,
) -> Result<Vec<ParagraphRecord>> {
    let mut boxes = Vec::new();
    collect_boxes(params, page_num, &page.objects, &mut boxes)?;

    let mut records: Vec<ParagraphRecord> = boxes
        .into_iter()
        .map(|bx| ParagraphRecord {
            text: bx.text(),
            bbox: bx.bbox(),
            page_num,
            indentation_level: (bx.x0() / params.indent_unit) as i32,
        })
        .collect();

    records.sort_by_key(|r| (-r.bbox.1).trunc() as i64);
    Ok(records)
}
