//! Layout element types: line primitives, the page input tree, and
//! paragraph boxes.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::utils::{HasBBox, INF_F64, Plane, Rect};

/// Writing axis of a line primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// One positioned run of extracted text on a page.
///
/// Produced by an external document parser; immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    bbox: Rect,
    text: String,
    #[serde(default)]
    axis: Axis,
}

impl LinePrimitive {
    pub fn new(bbox: Rect, text: impl Into<String>, axis: Axis) -> Self {
        Self {
            bbox,
            text: text.into(),
            axis,
        }
    }

    pub fn horizontal(bbox: Rect, text: impl Into<String>) -> Self {
        Self::new(bbox, text, Axis::Horizontal)
    }

    pub fn vertical(bbox: Rect, text: impl Into<String>) -> Self {
        Self::new(bbox, text, Axis::Vertical)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The line's extent along its reading axis: height for horizontal
    /// lines, width for vertical ones. Margins are expressed relative to
    /// this value.
    pub fn reading_extent(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.height(),
            Axis::Vertical => self.width(),
        }
    }

    /// Finds neighboring lines in the plane under the given margin ratio.
    ///
    /// The search box is the line's bbox expanded by `ratio * reading
    /// extent` along the reading axis. Candidates must share the line's
    /// axis, have the same cross extent within tolerance, and be left-,
    /// right-, or center-aligned within tolerance.
    pub fn find_neighbors<'a>(
        &self,
        plane: &'a Plane<LinePrimitive>,
        ratio: f64,
    ) -> Vec<(usize, &'a LinePrimitive)> {
        match self.axis {
            Axis::Horizontal => {
                let d = ratio * self.height();
                let search_bbox = (self.x0(), self.y0() - d, self.x1(), self.y1() + d);
                plane
                    .find(search_bbox)
                    .into_iter()
                    .filter(|(_, obj)| {
                        obj.axis == Axis::Horizontal
                            && self.is_same_height_as(obj, d)
                            && (self.is_left_aligned_with(obj, d)
                                || self.is_right_aligned_with(obj, d)
                                || self.is_centrally_aligned_with(obj, d))
                    })
                    .collect()
            }
            Axis::Vertical => {
                let d = ratio * self.width();
                let search_bbox = (self.x0() - d, self.y0(), self.x1() + d, self.y1());
                plane
                    .find(search_bbox)
                    .into_iter()
                    .filter(|(_, obj)| {
                        obj.axis == Axis::Vertical
                            && self.is_same_width_as(obj, d)
                            && (self.is_lower_aligned_with(obj, d)
                                || self.is_upper_aligned_with(obj, d)
                                || self.is_vertically_centered_with(obj, d))
                    })
                    .collect()
            }
        }
    }

    /// The gap to `other` along the reading axis, normalized by this line's
    /// own extent. Nearest-edge distance, so overlapping lines report the
    /// smaller of the two edge gaps.
    pub fn normalized_gap(&self, other: &LinePrimitive) -> f64 {
        match self.axis {
            Axis::Horizontal => {
                let gap = (other.y0() - self.y1())
                    .abs()
                    .min((other.y1() - self.y0()).abs());
                gap / self.height()
            }
            Axis::Vertical => {
                let gap = (other.x0() - self.x1())
                    .abs()
                    .min((other.x1() - self.x0()).abs());
                gap / self.width()
            }
        }
    }

    fn is_left_aligned_with(&self, other: &Self, tolerance: f64) -> bool {
        (other.x0() - self.x0()).abs() <= tolerance
    }

    fn is_right_aligned_with(&self, other: &Self, tolerance: f64) -> bool {
        (other.x1() - self.x1()).abs() <= tolerance
    }

    fn is_centrally_aligned_with(&self, other: &Self, tolerance: f64) -> bool {
        let self_center = (self.x0() + self.x1()) / 2.0;
        let other_center = (other.x0() + other.x1()) / 2.0;
        (other_center - self_center).abs() <= tolerance
    }

    fn is_same_height_as(&self, other: &Self, tolerance: f64) -> bool {
        (other.height() - self.height()).abs() <= tolerance
    }

    fn is_lower_aligned_with(&self, other: &Self, tolerance: f64) -> bool {
        (other.y0() - self.y0()).abs() <= tolerance
    }

    fn is_upper_aligned_with(&self, other: &Self, tolerance: f64) -> bool {
        (other.y1() - self.y1()).abs() <= tolerance
    }

    fn is_vertically_centered_with(&self, other: &Self, tolerance: f64) -> bool {
        let self_center = (self.y0() + self.y1()) / 2.0;
        let other_center = (other.y0() + other.y1()) / 2.0;
        (other_center - self_center).abs() <= tolerance
    }

    fn is_same_width_as(&self, other: &Self, tolerance: f64) -> bool {
        (other.width() - self.width()).abs() <= tolerance
    }
}

impl HasBBox for LinePrimitive {
    fn x0(&self) -> f64 {
        self.bbox.0
    }
    fn y0(&self) -> f64 {
        self.bbox.1
    }
    fn x1(&self) -> f64 {
        self.bbox.2
    }
    fn y1(&self) -> f64 {
        self.bbox.3
    }
}

/// One node of a page's input tree. Containers may nest arbitrarily; the
/// leaves are line primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageObject {
    Line(LinePrimitive),
    Group {
        bbox: Rect,
        children: Vec<PageObject>,
    },
}

/// One page of input: an ordered tree of page objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub objects: Vec<PageObject>,
}

impl Page {
    pub fn new(objects: Vec<PageObject>) -> Self {
        Self { objects }
    }

    /// A flat page holding only top-level lines, the common case.
    pub fn from_lines(lines: Vec<LinePrimitive>) -> Self {
        Self {
            objects: lines.into_iter().map(PageObject::Line).collect(),
        }
    }
}

/// A cluster of line primitives inferred to form one paragraph.
///
/// The bounding box is the union of the members; the axis is inherited from
/// the seed line of the cluster.
#[derive(Debug, Clone)]
pub struct ParagraphBox {
    axis: Axis,
    bbox: Rect,
    lines: Vec<LinePrimitive>,
}

impl ParagraphBox {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            bbox: (INF_F64, INF_F64, -INF_F64, -INF_F64),
            lines: Vec::new(),
        }
    }

    /// Adds a member line, expanding the bounding box.
    pub fn add(&mut self, line: LinePrimitive) {
        let bbox = line.bbox();
        self.bbox.0 = self.bbox.0.min(bbox.0);
        self.bbox.1 = self.bbox.1.min(bbox.1);
        self.bbox.2 = self.bbox.2.max(bbox.2);
        self.bbox.3 = self.bbox.3.max(bbox.3);
        self.lines.push(line);
    }

    /// Sorts members into reading order: top-to-bottom for horizontal boxes,
    /// right-to-left for vertical ones.
    pub fn analyze(&mut self) {
        match self.axis {
            Axis::Horizontal => self.lines.sort_by(|a, b| {
                b.y1()
                    .partial_cmp(&a.y1())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            Axis::Vertical => self.lines.sort_by(|a, b| {
                b.x1()
                    .partial_cmp(&a.x1())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
    }

    /// The member texts in reading order, separated by line breaks.
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| l.text()).join("\n")
    }

    /// True when the box has no text content after stripping. Empty boxes
    /// are never materialized into paragraph records.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_blank())
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn lines(&self) -> &[LinePrimitive] {
        &self.lines
    }
}

impl HasBBox for ParagraphBox {
    fn x0(&self) -> f64 {
        self.bbox.0
    }
    fn y0(&self) -> f64 {
        self.bbox.1
    }
    fn x1(&self) -> f64 {
        self.bbox.2
    }
    fn y1(&self) -> f64 {
        self.bbox.3
    }
}
