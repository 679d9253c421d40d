//! Clustering parameters.
//!
//! Contains the ClusterParams struct controlling how aggressively line
//! primitives are merged into paragraph boxes.

use super::elements::Axis;

/// Parameters for adaptive paragraph clustering.
///
/// The margin ratios are starting points, not hard thresholds: each line's
/// effective margin is corrected downward to the tightest gap actually
/// observed among its neighbors, so layouts with unusual leading still
/// cluster sensibly without per-document tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    /// If two horizontal lines are closer together than this margin they are
    /// candidates for the same paragraph. Specified relative to the height
    /// of the line.
    pub horizontal_margin_ratio: f64,

    /// Margin for vertically-set lines. Specified relative to the width of
    /// the line.
    pub vertical_margin_ratio: f64,

    /// Slack applied to an observed neighbor gap before it can tighten a
    /// line's margin, so the nearest real neighbor stays inside it.
    pub margin_slack: f64,

    /// Width in page units of one indentation bucket when deriving a
    /// record's indentation level from its left edge.
    pub indent_unit: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            horizontal_margin_ratio: 3.0,
            vertical_margin_ratio: 2.5,
            margin_slack: 1.05,
            indent_unit: 10.0,
        }
    }
}

impl ClusterParams {
    /// The global default margin ratio for lines set along the given axis.
    pub fn margin_ratio(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_margin_ratio,
            Axis::Vertical => self.vertical_margin_ratio,
        }
    }
}
