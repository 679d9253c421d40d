//! Adaptive clustering of line primitives into paragraph boxes.
//!
//! A fixed line margin either merges unrelated paragraphs separated by small
//! gaps or fails to merge within-paragraph lines under large leading. The
//! grouping here starts from the global margin ratio and corrects it per
//! line against the tightest gap actually observed among that line's
//! neighbors, which makes the clustering self-calibrating per layout.

use log::debug;

use super::elements::{LinePrimitive, ParagraphBox};
use super::params::ClusterParams;
use crate::utils::Plane;

/// Union-find over line indices. Merging through it is idempotent and
/// order-independent, so transitively connected lines end up in a single
/// box regardless of the order neighbor relationships are discovered in.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// Groups line primitives into paragraph boxes.
///
/// Every non-blank line ends up in exactly one box, except lines whose
/// geometry is so degenerate that they never match as their own neighbor;
/// those are skipped. Blank lines tighten their neighbors' margins but are
/// never members. Boxes are returned in order of their first member line.
pub fn group_lines(params: &ClusterParams, lines: Vec<LinePrimitive>) -> Vec<ParagraphBox> {
    if lines.is_empty() {
        return Vec::new();
    }

    let plane: Plane<LinePrimitive> = lines.into_iter().collect();
    let n = plane.len();
    let mut merges = UnionFind::new(n);
    let mut matched = vec![false; n];

    for i in 0..n {
        let line = plane.get(i);
        if line.is_blank() {
            continue;
        }

        let global_ratio = params.margin_ratio(line.axis());
        let neighbors = line.find_neighbors(&plane, global_ratio);
        if !neighbors.iter().any(|&(id, _)| id == i) {
            debug!("line {i} excluded from its own neighborhood, skipping");
            continue;
        }

        // Correct the margin to the tightest observed gap: the margin never
        // exceeds the smallest real neighbor gap scaled by the slack factor.
        let mut true_margin = global_ratio;
        for &(id, other) in &neighbors {
            if id == i {
                continue;
            }
            let margin = line.normalized_gap(other) * params.margin_slack;
            if margin < true_margin {
                true_margin = margin;
            }
        }

        let neighbors = line.find_neighbors(&plane, true_margin);
        if !neighbors.iter().any(|&(id, _)| id == i) {
            debug!("line {i} lost under corrected margin {true_margin:.3}, skipping");
            continue;
        }

        matched[i] = true;
        for (id, other) in neighbors {
            if other.is_blank() {
                continue;
            }
            matched[id] = true;
            merges.union(i, id);
        }
    }

    // Materialize one box per connected component, keyed by root, in order
    // of each component's first member line.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
    let mut member_ids: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        if !matched[i] {
            continue;
        }
        let root = merges.find(i);
        match slot_of_root[root] {
            Some(slot) => member_ids[slot].push(i),
            None => {
                slot_of_root[root] = Some(member_ids.len());
                member_ids.push(vec![i]);
            }
        }
    }

    let mut slots: Vec<Option<LinePrimitive>> = plane.into_seq().into_iter().map(Some).collect();
    let mut boxes = Vec::with_capacity(member_ids.len());
    for ids in member_ids {
        let Some(seed) = ids.first().and_then(|&id| slots[id].as_ref()) else {
            continue;
        };
        let mut bx = ParagraphBox::new(seed.axis());
        for id in ids {
            if let Some(line) = slots[id].take() {
                bx.add(line);
            }
        }
        if bx.is_empty() {
            continue;
        }
        bx.analyze();
        boxes.push(bx);
    }

    debug!("grouped {n} lines into {} boxes", boxes.len());
    boxes
}
