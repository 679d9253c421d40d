//! Geometry helpers and the Plane spatial index.
//!
//! Provides:
//! - Geometric type aliases (Point, Rect)
//! - The HasBBox trait for anything with a bounding box
//! - Plane, a spatial index for efficient bounding-box intersection queries
//! - Printable-ASCII classification used by the output filters

use rstar::{AABB, RTree, RTreeObject};

/// Floating-point infinity stand-in for bounding box accumulation.
pub const INF_F64: f64 = f64::MAX;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is the bottom-left
/// corner and (x1, y1) the top-right, in page coordinates (y grows upward).
pub type Rect = (f64, f64, f64, f64);

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}

/// Whether `c` belongs to the printable ASCII set: the graphic characters,
/// space, and the whitespace controls tab, newline, carriage return,
/// vertical tab and form feed.
pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

#[derive(Clone)]
struct PlaneNode {
    id: usize,
    bbox: Rect,
}

impl RTreeObject for PlaneNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.0, self.bbox.1], [self.bbox.2, self.bbox.3])
    }
}

/// A set-like structure for objects placed on a plane.
///
/// Items are stored in insertion order and ids are stable (id == seq index).
/// The R-tree is bulk-loaded once; the clustering pass never removes items.
pub struct Plane<T> {
    /// Items in insertion order (id == index)
    seq: Vec<T>,
    tree: RTree<PlaneNode>,
}

impl<T: HasBBox> Plane<T> {
    pub fn new() -> Self {
        Self {
            seq: Vec::new(),
            tree: RTree::new(),
        }
    }

    /// Adds the objects to the plane and builds the spatial index.
    pub fn extend(&mut self, objs: impl IntoIterator<Item = T>) {
        let start_idx = self.seq.len();
        self.seq.extend(objs);
        let nodes: Vec<PlaneNode> = self.seq[start_idx..]
            .iter()
            .enumerate()
            .map(|(i, obj)| PlaneNode {
                id: start_idx + i,
                bbox: obj.bbox(),
            })
            .collect();
        if start_idx == 0 {
            self.tree = RTree::bulk_load(nodes);
        } else {
            for node in nodes {
                self.tree.insert(node);
            }
        }
    }

    /// Finds objects that strictly intersect the given bounding box,
    /// returning (id, object) pairs in ascending id order.
    ///
    /// Touching edges do not count as intersection, so a degenerate
    /// zero-extent query box matches nothing, including its own object.
    pub fn find(&self, bbox: Rect) -> Vec<(usize, &T)> {
        let (x0, y0, x1, y1) = bbox;
        let env = AABB::from_corners([x0, y0], [x1, y1]);

        let mut result: Vec<(usize, &T)> = self
            .tree
            .locate_in_envelope_intersecting(&env)
            .filter(|node| {
                let b = node.bbox;
                !(b.2 <= x0 || x1 <= b.0 || b.3 <= y0 || y1 <= b.1)
            })
            .map(|node| (node.id, &self.seq[node.id]))
            .collect();
        result.sort_unstable_by_key(|(id, _)| *id);
        result
    }

    pub fn get(&self, id: usize) -> &T {
        &self.seq[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.seq.iter()
    }

    /// Consumes the plane, returning the items in insertion order.
    pub fn into_seq(self) -> Vec<T> {
        self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

impl<T: HasBBox> Default for Plane<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasBBox> FromIterator<T> for Plane<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut plane = Self::new();
        plane.extend(iter);
        plane
    }
}
