//! Tests for the layout module: neighbor queries, adaptive clustering,
//! and the properties the grouping algorithm guarantees.

use lineweave_core::layout::{Axis, ClusterParams, LinePrimitive, ParagraphBox, group_lines};
use lineweave_core::utils::{HasBBox, Plane, Rect};

fn hline(bbox: Rect, text: &str) -> LinePrimitive {
    LinePrimitive::horizontal(bbox, text)
}

fn vline(bbox: Rect, text: &str) -> LinePrimitive {
    LinePrimitive::vertical(bbox, text)
}

fn box_texts(boxes: &[ParagraphBox]) -> Vec<String> {
    boxes.iter().map(|b| b.text()).collect()
}

// ============================================================================
// Neighbor queries
// ============================================================================

#[test]
fn test_find_neighbors_horizontal() {
    let line = hline((10.0, 4.0, 20.0, 6.0), "a");
    let plane: Plane<LinePrimitive> = [
        line.clone(),
        hline((10.0, 6.0, 15.0, 8.0), "left aligned above"),
        hline((15.0, 2.0, 20.0, 4.0), "right aligned below"),
        hline((13.0, 5.0, 17.0, 7.0), "centrally aligned overlapping"),
        hline((0.0, 6.0, 5.0, 8.0), "not aligned"),
        hline((10.0, 6.0, 15.0, 10.0), "wrong height"),
    ]
    .into_iter()
    .collect();

    let neighbors = line.find_neighbors(&plane, 0.5);

    // line itself plus the three aligned same-height candidates; excluded:
    // not_aligned (wrong x position), wrong_height (different height).
    let ids: Vec<usize> = neighbors.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_find_neighbors_vertical() {
    let line = vline((4.0, 10.0, 6.0, 20.0), "a");
    let plane: Plane<LinePrimitive> = [
        line.clone(),
        vline((6.0, 10.0, 8.0, 15.0), "bottom aligned right"),
        vline((2.0, 15.0, 4.0, 20.0), "top aligned left"),
        vline((5.0, 13.0, 7.0, 17.0), "centrally aligned overlapping"),
        vline((6.0, 0.0, 8.0, 5.0), "not aligned"),
        vline((6.0, 10.0, 10.0, 15.0), "wrong width"),
    ]
    .into_iter()
    .collect();

    let neighbors = line.find_neighbors(&plane, 0.5);

    let ids: Vec<usize> = neighbors.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_find_neighbors_ignores_other_axis() {
    let line = hline((10.0, 10.0, 60.0, 20.0), "horizontal");
    let plane: Plane<LinePrimitive> = [
        line.clone(),
        vline((10.0, 10.0, 60.0, 20.0), "vertical twin"),
    ]
    .into_iter()
    .collect();

    let neighbors = line.find_neighbors(&plane, 3.0);
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].0, 0);
}

// ============================================================================
// Clustering
// ============================================================================

#[test]
fn test_separated_lines_form_separate_boxes() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            hline((0.0, 0.0, 50.0, 5.0), "lower"),
            hline((0.0, 50.0, 50.0, 55.0), "upper"),
        ],
    );
    assert_eq!(boxes.len(), 2);
}

#[test]
fn test_adjacent_lines_merge_into_one_box() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            hline((0.0, 24.0, 100.0, 34.0), "first"),
            hline((0.0, 12.0, 100.0, 22.0), "second"),
            hline((0.0, 0.0, 100.0, 10.0), "third"),
        ],
    );
    assert_eq!(boxes.len(), 1);
    // Members concatenate top-to-bottom regardless of discovery order.
    assert_eq!(boxes[0].text(), "first\nsecond\nthird");
    assert_eq!(boxes[0].axis(), Axis::Horizontal);
    assert_eq!(boxes[0].bbox(), (0.0, 0.0, 100.0, 34.0));
}

#[test]
fn test_margin_correction_splits_nearby_paragraphs() {
    // Two tightly-leaded stacks separated by a 26pt gap. The global margin
    // (3.0 x height = 30pt) would span the gap; the corrected margin is
    // tightened to the observed 2pt leading and keeps the stacks apart.
    let lines = vec![
        hline((0.0, 72.0, 100.0, 82.0), "second top"),
        hline((0.0, 60.0, 100.0, 70.0), "second bottom"),
        hline((0.0, 24.0, 100.0, 34.0), "first top"),
        hline((0.0, 12.0, 100.0, 22.0), "first middle"),
        hline((0.0, 0.0, 100.0, 10.0), "first bottom"),
    ];
    let boxes = group_lines(&ClusterParams::default(), lines);

    assert_eq!(boxes.len(), 2);
    let texts = box_texts(&boxes);
    assert!(texts.contains(&"second top\nsecond bottom".to_string()));
    assert!(texts.contains(&"first top\nfirst middle\nfirst bottom".to_string()));
}

#[test]
fn test_clustering_is_idempotent() {
    let lines = vec![
        hline((0.0, 72.0, 100.0, 82.0), "a"),
        hline((0.0, 60.0, 100.0, 70.0), "b"),
        hline((40.0, 24.0, 140.0, 34.0), "c"),
        hline((40.0, 12.0, 140.0, 22.0), "d"),
        hline((200.0, 12.0, 260.0, 22.0), "e"),
    ];
    let params = ClusterParams::default();

    let first = group_lines(&params, lines.clone());
    let second = group_lines(&params, lines);

    assert_eq!(box_texts(&first), box_texts(&second));
    let bboxes = |bs: &[ParagraphBox]| bs.iter().map(|b| b.bbox()).collect::<Vec<_>>();
    assert_eq!(bboxes(&first), bboxes(&second));
}

#[test]
fn test_every_non_blank_line_lands_in_exactly_one_box() {
    let mut lines = Vec::new();
    for col in 0..3 {
        for row in 0..7 {
            let x0 = col as f64 * 200.0;
            let y0 = row as f64 * 13.0;
            lines.push(hline((x0, y0, x0 + 150.0, y0 + 10.0), "filler text"));
        }
    }
    lines.push(hline((0.0, 300.0, 150.0, 310.0), "   "));

    let boxes = group_lines(&ClusterParams::default(), lines);
    let member_count: usize = boxes.iter().map(|b| b.lines().len()).sum();
    assert_eq!(member_count, 21);
}

#[test]
fn test_margin_monotonicity() {
    let lines: Vec<LinePrimitive> = (0..5)
        .map(|i| {
            let y0 = i as f64 * 12.0;
            hline((0.0, y0, 100.0, y0 + 10.0), "row")
        })
        .collect();

    let tight = ClusterParams {
        horizontal_margin_ratio: 0.1,
        ..ClusterParams::default()
    };
    let loose = ClusterParams::default();

    let tight_boxes = group_lines(&tight, lines.clone());
    let loose_boxes = group_lines(&loose, lines);

    // A more permissive margin never splits what the tighter one merged.
    assert_eq!(tight_boxes.len(), 5);
    assert_eq!(loose_boxes.len(), 1);
    for small in &tight_boxes {
        let superset = loose_boxes.iter().any(|big| {
            small
                .lines()
                .iter()
                .all(|line| big.lines().iter().any(|l| l.bbox() == line.bbox()))
        });
        assert!(superset);
    }
}

#[test]
fn test_blank_lines_tighten_margins_but_never_join() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            hline((0.0, 24.0, 100.0, 34.0), "beta"),
            hline((0.0, 12.0, 100.0, 22.0), "   "),
            hline((0.0, 0.0, 100.0, 10.0), "alpha"),
        ],
    );
    // The blank spacer caps both margins at its own 2pt gap, so alpha and
    // beta stay apart, and the spacer itself is not a member of either box.
    assert_eq!(boxes.len(), 2);
    let texts = box_texts(&boxes);
    assert!(texts.contains(&"beta".to_string()));
    assert!(texts.contains(&"alpha".to_string()));
}

#[test]
fn test_degenerate_line_is_skipped() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            hline((0.0, 5.0, 100.0, 5.0), "ghost"),
            hline((0.0, 10.0, 100.0, 20.0), "real"),
        ],
    );
    // A zero-height line never matches as its own neighbor and is dropped.
    assert_eq!(box_texts(&boxes), vec!["real".to_string()]);
}

#[test]
fn test_vertical_lines_cluster_right_to_left() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            vline((10.0, 0.0, 20.0, 100.0), "second column"),
            vline((22.0, 0.0, 32.0, 100.0), "first column"),
        ],
    );
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].axis(), Axis::Vertical);
    assert_eq!(boxes[0].text(), "first column\nsecond column");
}

#[test]
fn test_empty_input() {
    assert!(group_lines(&ClusterParams::default(), Vec::new()).is_empty());
}

#[test]
fn test_all_blank_input_yields_no_boxes() {
    let boxes = group_lines(
        &ClusterParams::default(),
        vec![
            hline((0.0, 0.0, 100.0, 10.0), ""),
            hline((0.0, 12.0, 100.0, 22.0), " \t "),
        ],
    );
    assert!(boxes.is_empty());
}
