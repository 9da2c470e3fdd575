//! Bounding-box quadtree over node footprints. Rebuilt in bulk per graph
//! load, queried on every pointer move, so lookups must stay sub-linear.

use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

/// One indexed node footprint: its position expanded by a fixed half-extent,
/// plus back-references used by hit testing.
#[derive(Clone, Debug)]
pub struct IndexEntry {
    pub min: Vec2,
    pub max: Vec2,
    pub point: Vec2,
    pub id: String,
}

#[derive(Clone, Copy, Debug)]
struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    fn of_entries(entries: &[IndexEntry], indices: &[usize]) -> Self {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for &index in indices {
            let entry = &entries[index];
            min.x = min.x.min(entry.min.x);
            min.y = min.y.min(entry.min.y);
            max.x = max.x.max(entry.max.x);
            max.y = max.y.max(entry.max.y);
        }

        Self { min, max }
    }

    /// Squared distance from `point` to the box; zero inside. Entry points
    /// all lie within the box, so this is a valid lower bound for pruning.
    fn distance_sq_to(self, point: Vec2) -> f32 {
        let dx = (self.min.x - point.x).max(0.0).max(point.x - self.max.x);
        let dy = (self.min.y - point.y).max(0.0).max(point.y - self.max.y);
        (dx * dx) + (dy * dy)
    }

    fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

struct TreeNode {
    aabb: Aabb,
    entries: Vec<usize>,
    children: [Option<Box<TreeNode>>; 4],
}

impl TreeNode {
    fn build(entries: &[IndexEntry], indices: Vec<usize>, depth: usize) -> Self {
        let aabb = Aabb::of_entries(entries, &indices);
        let mut node = Self {
            aabb,
            entries: indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.entries.len() <= LEAF_CAPACITY {
            return node;
        }

        let center = aabb.center();
        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.entries {
            let point = entries[index].point;
            let quadrant = match (point.x >= center.x, point.y >= center.y) {
                (false, false) => 0,
                (true, false) => 1,
                (false, true) => 2,
                (true, true) => 3,
            };
            buckets[quadrant].push(index);
        }

        let non_empty = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if non_empty <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            node.children[quadrant] = Some(Box::new(Self::build(entries, bucket, depth + 1)));
        }
        node.entries.clear();
        node
    }

    fn nearest(
        &self,
        entries: &[IndexEntry],
        query: Vec2,
        best: &mut Option<(f32, usize)>,
    ) {
        if let Some((best_dist, _)) = best
            && self.aabb.distance_sq_to(query) >= *best_dist
        {
            return;
        }

        for &index in &self.entries {
            let dist = (entries[index].point - query).length_sq();
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                *best = Some((dist, index));
            }
        }

        let mut order = self
            .children
            .iter()
            .flatten()
            .map(|child| (child.aabb.distance_sq_to(query), child.as_ref()))
            .collect::<Vec<_>>();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, child) in order {
            child.nearest(entries, query, best);
        }
    }
}

#[derive(Default)]
pub struct SpatialIndex {
    entries: Vec<IndexEntry>,
    root: Option<Box<TreeNode>>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards prior contents and bulk-loads one entry per node, expanded
    /// by `half_extent` on each side. Must run after node positions are
    /// final and before any query against the new graph.
    pub fn rebuild<I>(&mut self, nodes: I, half_extent: f32)
    where
        I: IntoIterator<Item = (String, Vec2)>,
    {
        self.entries = nodes
            .into_iter()
            .map(|(id, point)| IndexEntry {
                min: point - vec2(half_extent, half_extent),
                max: point + vec2(half_extent, half_extent),
                point,
                id,
            })
            .collect();

        self.root = if self.entries.is_empty() {
            None
        } else {
            let indices = (0..self.entries.len()).collect::<Vec<_>>();
            Some(Box::new(TreeNode::build(&self.entries, indices, 0)))
        };
    }

    /// Closest entry to `(x, y)` by Euclidean distance between stored
    /// points, or `None` when the index is empty. Ties have no defined
    /// winner.
    pub fn nearest_to(&self, x: f32, y: f32) -> Option<&IndexEntry> {
        let root = self.root.as_ref()?;
        let mut best = None;
        root.nearest(&self.entries, vec2(x, y), &mut best);
        best.map(|(_, index)| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}
