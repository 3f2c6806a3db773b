//! Arena quadtree over plotted point centers, used for hover hit-testing.
//!
//! Nodes live in one `Vec` and refer to their children by index. Each node's
//! bounds are fixed when the node is created; splitting a leaf creates four
//! children covering its quadrants. Leaves hold every point inserted at one
//! exact position, so coincident points never force a split.
//!
//! Quadrants are numbered `0` top-left, `1` top-right, `2` bottom-left,
//! `3` bottom-right (screen coordinates, y grows downwards).

use stipple_core::{Color, Point, Rect};
use thiserror::Error;

/// Deepest allowed node. Also bounds how many times the root may grow.
pub const MAX_DEPTH: usize = 64;

/// A point as captured at insertion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    /// Center in device pixels
    pub position: Point,
    /// Record index in the dataset
    pub record: usize,
    /// Drawn radius in device pixels
    pub radius: f32,
    /// Resolved marker color
    pub color: Color,
}

/// Why a point could not be indexed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// The point's center is NaN or infinite.
    #[error("record {record} has a non-finite position ({x}, {y})")]
    NonFinite {
        /// Record index
        record: usize,
        /// X coordinate
        x: f32,
        /// Y coordinate
        y: f32,
    },

    /// Separating the point from its neighbours needs more than [`MAX_DEPTH`] levels.
    #[error("record {record} cannot be separated within {MAX_DEPTH} levels")]
    TooDeep {
        /// Record index
        record: usize,
    },
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The matched point
    pub point: IndexedPoint,
    /// Distance from the query position to its center
    pub distance: f32,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Empty,
    /// Indices into `points`, all sharing one position
    Leaf(Vec<usize>),
    Branch([usize; 4]),
}

#[derive(Debug, Clone)]
struct Node {
    bounds: Rect,
    kind: NodeKind,
    /// Largest radius of any point below this node
    max_radius: f32,
    /// Largest record index below this node
    max_record: Option<usize>,
}

impl Node {
    const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            kind: NodeKind::Empty,
            max_radius: 0.0,
            max_record: None,
        }
    }

    fn absorb(&mut self, point: &IndexedPoint) {
        self.max_radius = self.max_radius.max(point.radius);
        self.max_record = self.max_record.max(Some(point.record));
    }

    /// Whether a disk of radius `reach` centered anywhere in this node could
    /// contain `at`.
    fn within_reach(&self, at: Point, reach: f32) -> bool {
        let b = &self.bounds;
        !(at.x < b.x - reach
            || at.x > b.right() + reach
            || at.y < b.y - reach
            || at.y > b.bottom() + reach)
    }
}

fn quadrant_of(bounds: &Rect, at: Point) -> usize {
    let mid = bounds.center();
    usize::from(at.x >= mid.x) | (usize::from(at.y >= mid.y) << 1)
}

fn quadrant_bounds(bounds: &Rect, quadrant: usize) -> Rect {
    let w = bounds.width / 2.0;
    let h = bounds.height / 2.0;
    let x = if quadrant & 1 == 0 { bounds.x } else { bounds.x + w };
    let y = if quadrant & 2 == 0 { bounds.y } else { bounds.y + h };
    Rect::new(x, y, w, h)
}

/// Child visit order putting the query's own quadrant first.
const fn visit_order(right: bool, bottom: bool) -> [usize; 4] {
    match (right, bottom) {
        (true, true) => [3, 2, 1, 0],
        (true, false) => [1, 0, 3, 2],
        (false, true) => [2, 3, 0, 1],
        (false, false) => [0, 1, 2, 3],
    }
}

/// Point quadtree with precomputed node bounds.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    root: usize,
    points: Vec<IndexedPoint>,
}

impl QuadTree {
    /// Create an empty tree whose root covers `extent`.
    ///
    /// Points outside the extent grow the root as they arrive.
    #[must_use]
    pub fn new(extent: Rect) -> Self {
        Self {
            nodes: vec![Node::new(Self::sanitize(extent))],
            root: 0,
            points: Vec::new(),
        }
    }

    fn sanitize(extent: Rect) -> Rect {
        let finite = extent.x.is_finite()
            && extent.y.is_finite()
            && extent.width.is_finite()
            && extent.height.is_finite();
        if !finite {
            return Rect::new(0.0, 0.0, 1.0, 1.0);
        }
        Rect::new(
            extent.x,
            extent.y,
            extent.width.max(1.0),
            extent.height.max(1.0),
        )
    }

    /// Drop every point and start over with a new extent.
    pub fn reset(&mut self, extent: Rect) {
        *self = Self::new(extent);
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indexed points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[IndexedPoint] {
        &self.points
    }

    /// Bounds of the root node.
    #[must_use]
    pub fn extent(&self) -> Rect {
        self.nodes[self.root].bounds
    }

    /// Index a point.
    ///
    /// On error the point is not indexed; the tree still answers queries for
    /// the points inserted before it.
    pub fn insert(&mut self, point: IndexedPoint) -> Result<(), IndexError> {
        if !point.position.is_finite() {
            return Err(IndexError::NonFinite {
                record: point.record,
                x: point.position.x,
                y: point.position.y,
            });
        }
        self.cover(point.position, point.record)?;

        let slot = self.points.len();
        let mut node = self.root;
        for _ in 0..MAX_DEPTH {
            self.nodes[node].absorb(&point);
            let kind = &mut self.nodes[node].kind;
            match kind {
                NodeKind::Empty => {
                    *kind = NodeKind::Leaf(vec![slot]);
                    self.points.push(point);
                    return Ok(());
                }
                NodeKind::Leaf(bucket) => {
                    let resident = self.points[bucket[0]].position;
                    if resident == point.position {
                        bucket.push(slot);
                        self.points.push(point);
                        return Ok(());
                    }
                    let bucket = std::mem::take(bucket);
                    self.split(node, bucket, resident);
                    node = self.child_for(node, point.position);
                }
                NodeKind::Branch(_) => node = self.child_for(node, point.position),
            }
        }
        Err(IndexError::TooDeep {
            record: point.record,
        })
    }

    /// Grow the root until it contains `at`, doubling towards it.
    fn cover(&mut self, at: Point, record: usize) -> Result<(), IndexError> {
        for _ in 0..MAX_DEPTH {
            let old = self.nodes[self.root].bounds;
            if old.contains_point(&at) {
                return Ok(());
            }
            let grow_left = at.x < old.x;
            let grow_up = at.y < old.y;
            let bounds = Rect::new(
                if grow_left { old.x - old.width } else { old.x },
                if grow_up { old.y - old.height } else { old.y },
                old.width * 2.0,
                old.height * 2.0,
            );
            let old_quadrant = usize::from(grow_left) | (usize::from(grow_up) << 1);

            let mut children = [0; 4];
            for (quadrant, child) in children.iter_mut().enumerate() {
                *child = if quadrant == old_quadrant {
                    self.root
                } else {
                    self.push_node(quadrant_bounds(&bounds, quadrant))
                };
            }
            let mut root = Node::new(bounds);
            root.max_radius = self.nodes[self.root].max_radius;
            root.max_record = self.nodes[self.root].max_record;
            root.kind = NodeKind::Branch(children);
            self.root = self.push_node_with(root);
        }
        Err(IndexError::TooDeep { record })
    }

    fn push_node(&mut self, bounds: Rect) -> usize {
        self.push_node_with(Node::new(bounds))
    }

    fn push_node_with(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Turn a leaf into a branch, moving its bucket into the right child.
    fn split(&mut self, node: usize, bucket: Vec<usize>, resident: Point) {
        let bounds = self.nodes[node].bounds;
        let target = quadrant_of(&bounds, resident);
        let mut bucket = Some(bucket);
        let mut children = [0; 4];
        for (quadrant, child) in children.iter_mut().enumerate() {
            let mut fresh = Node::new(quadrant_bounds(&bounds, quadrant));
            if quadrant == target {
                if let Some(bucket) = bucket.take() {
                    for &slot in &bucket {
                        fresh.absorb(&self.points[slot]);
                    }
                    fresh.kind = NodeKind::Leaf(bucket);
                }
            }
            *child = self.push_node_with(fresh);
        }
        self.nodes[node].kind = NodeKind::Branch(children);
    }

    fn child_for(&self, node: usize, at: Point) -> usize {
        match &self.nodes[node].kind {
            NodeKind::Branch(children) => children[quadrant_of(&self.nodes[node].bounds, at)],
            NodeKind::Empty | NodeKind::Leaf(_) => node,
        }
    }

    /// Find the topmost point whose disk contains `at`.
    ///
    /// Among several containing disks the highest record index wins, matching
    /// draw order. `bound` caps how far any disk is considered to reach;
    /// callers pass the canvas width plus height.
    #[must_use]
    pub fn find(&self, at: Point, bound: f32) -> Option<Hit> {
        if self.points.is_empty() || !at.is_finite() {
            return None;
        }
        let mut best: Option<Hit> = None;
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let Some(max_record) = node.max_record else {
                continue;
            };
            if best.is_some_and(|b| max_record < b.point.record) {
                continue;
            }
            if !node.within_reach(at, node.max_radius.min(bound)) {
                continue;
            }
            match &node.kind {
                NodeKind::Empty => {}
                NodeKind::Leaf(bucket) => {
                    for &slot in bucket {
                        let point = self.points[slot];
                        let distance = at.distance(&point.position);
                        if distance > point.radius {
                            continue;
                        }
                        let better = best.map_or(true, |b| {
                            point.record > b.point.record
                                || (point.record == b.point.record && distance < b.distance)
                        });
                        if better {
                            best = Some(Hit { point, distance });
                        }
                    }
                }
                NodeKind::Branch(children) => {
                    let mid = node.bounds.center();
                    let order = visit_order(at.x >= mid.x, at.y >= mid.y);
                    stack.extend(order.iter().rev().map(|&q| children[q]));
                }
            }
        }
        best
    }
}
