//! Spatial indexing for router segments.
//!
//! A quadtree over segment envelopes. Boundary edges go in first, drawn coil
//! segments are appended as the router walks; nothing is ever removed, so a
//! segment's index doubles as its insertion order.

use floorcoil_core::{Envelope, IndexError, Segment, Vec2};
use std::ops::Index;

const DEFAULT_MAX_DEPTH: usize = 8;
const DEFAULT_MAX_ITEMS: usize = 16;

/// Origin of an indexed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Room outline or obstacle edge.
    Boundary,
    /// A segment of the coil laid down so far.
    DrawnPath,
}

/// A segment together with its origin tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSegment {
    pub segment: Segment,
    pub kind: SegmentKind,
}

/// Node counts reported by [`SpatialIndex::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialIndexStats {
    pub total_nodes: usize,
    pub total_items: usize,
    pub max_depth: usize,
    /// Items held directly by the root node.
    pub root_items: usize,
    pub boundary_items: usize,
    pub path_items: usize,
}

#[derive(Debug, Clone)]
struct QuadtreeNode {
    /// Cell that routes items by envelope centre.
    bounds: Envelope,
    /// Union of the envelopes of every item in this subtree.
    extent: Option<Envelope>,
    depth: usize,
    items: Vec<usize>,
    children: Option<Box<[QuadtreeNode; 4]>>,
}

impl QuadtreeNode {
    fn new(bounds: Envelope, depth: usize) -> Self {
        Self {
            bounds,
            extent: None,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    fn insert(
        &mut self,
        id: usize,
        env: &Envelope,
        entries: &[IndexedSegment],
        max_depth: usize,
        max_items: usize,
    ) {
        self.extent = Some(self.extent.map_or(*env, |e| e.union(env)));

        let slot = quadrant(self.bounds.center(), env.center());
        if let Some(children) = self.children.as_mut() {
            children[slot].insert(id, env, entries, max_depth, max_items);
            return;
        }

        self.items.push(id);
        if self.items.len() > max_items && self.depth < max_depth {
            self.split(entries, max_depth, max_items);
        }
    }

    fn split(&mut self, entries: &[IndexedSegment], max_depth: usize, max_items: usize) {
        let b = self.bounds;
        let c = b.center();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            QuadtreeNode::new(Envelope::new(b.min_x, b.min_y, c.x, c.y), depth),
            QuadtreeNode::new(Envelope::new(c.x, b.min_y, b.max_x, c.y), depth),
            QuadtreeNode::new(Envelope::new(b.min_x, c.y, c.x, b.max_y), depth),
            QuadtreeNode::new(Envelope::new(c.x, c.y, b.max_x, b.max_y), depth),
        ]));

        let items = std::mem::take(&mut self.items);
        let Some(children) = self.children.as_mut() else {
            return;
        };
        for id in items {
            let env = *entries[id].segment.envelope();
            children[quadrant(c, env.center())].insert(id, &env, entries, max_depth, max_items);
        }
    }

    fn query(&self, env: &Envelope, entries: &[IndexedSegment], out: &mut Vec<usize>) {
        if !self.extent.is_some_and(|e| e.intersects(env)) {
            return;
        }
        out.extend(
            self.items
                .iter()
                .copied()
                .filter(|&id| entries[id].segment.envelope().intersects(env)),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(env, entries, out);
            }
        }
    }

    fn collect_stats(&self, stats: &mut SpatialIndexStats) {
        stats.total_nodes += 1;
        stats.total_items += self.items.len();
        stats.max_depth = stats.max_depth.max(self.depth);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_stats(stats);
            }
        }
    }
}

/// Child cell of a node centred on `center` that holds `p`. Points outside
/// the node's cell go to the nearest quadrant.
fn quadrant(center: Vec2, p: Vec2) -> usize {
    usize::from(p.x >= center.x) + 2 * usize::from(p.y >= center.y)
}

/// Append-only quadtree of tagged segments.
///
/// Segments are filed under the cell holding their envelope centre, and every
/// node tracks the extent of what it holds, so long runs never pile up near
/// the root. Geometry outside the root bounds lands in the nearest cell.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    root: QuadtreeNode,
    entries: Vec<IndexedSegment>,
    boundary_count: usize,
    max_depth: usize,
    max_items: usize,
}

impl SpatialIndex {
    pub fn new(bounds: Envelope, max_depth: usize, max_items: usize) -> Self {
        Self {
            root: QuadtreeNode::new(bounds, 0),
            entries: Vec::new(),
            boundary_count: 0,
            max_depth,
            max_items: max_items.max(1),
        }
    }

    /// Inserts `segment` under an explicit index.
    ///
    /// The index must equal the current length, and boundary segments must
    /// all come before the first drawn-path segment.
    pub fn insert(
        &mut self,
        index: usize,
        segment: Segment,
        kind: SegmentKind,
    ) -> Result<(), IndexError> {
        let expected = self.entries.len();
        if index != expected {
            return Err(IndexError::NonMonotonic { index, expected });
        }
        if kind == SegmentKind::Boundary && self.boundary_count != expected {
            return Err(IndexError::BoundaryAfterPath(index));
        }
        if kind == SegmentKind::Boundary {
            self.boundary_count += 1;
        }

        self.entries.push(IndexedSegment { segment, kind });
        let env = *segment.envelope();
        self.root
            .insert(index, &env, &self.entries, self.max_depth, self.max_items);
        Ok(())
    }

    /// Inserts under the next free index and returns it.
    pub fn push(&mut self, segment: Segment, kind: SegmentKind) -> Result<usize, IndexError> {
        let index = self.entries.len();
        self.insert(index, segment, kind)?;
        Ok(index)
    }

    /// Appends a drawn-path segment; this can never violate ordering.
    pub fn push_path(&mut self, segment: Segment) -> usize {
        let index = self.entries.len();
        self.entries.push(IndexedSegment {
            segment,
            kind: SegmentKind::DrawnPath,
        });
        let env = *segment.envelope();
        self.root
            .insert(index, &env, &self.entries, self.max_depth, self.max_items);
        index
    }

    /// Indices of every segment whose envelope overlaps `env` grown by
    /// `tolerance`, in ascending order. This is a coarse filter only.
    pub fn query(&self, env: &Envelope, tolerance: f64) -> Vec<usize> {
        let query = env.expanded(tolerance);
        let mut out = Vec::new();
        self.root.query(&query, &self.entries, &mut out);
        out.sort_unstable();
        out
    }

    pub fn query_point(&self, p: Vec2, tolerance: f64) -> Vec<usize> {
        self.query(&Envelope::from_point(p), tolerance)
    }

    pub fn query_segment(&self, segment: &Segment, tolerance: f64) -> Vec<usize> {
        self.query(segment.envelope(), tolerance)
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.entries.get(index).map(|e| &e.segment)
    }

    pub fn kind(&self, index: usize) -> Option<SegmentKind> {
        self.entries.get(index).map(|e| e.kind)
    }

    pub fn is_boundary(&self, index: usize) -> bool {
        index < self.boundary_count
    }

    /// Index of the most recently inserted segment.
    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    pub fn boundary_count(&self) -> usize {
        self.boundary_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedSegment> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.root = QuadtreeNode::new(self.root.bounds, 0);
        self.entries.clear();
        self.boundary_count = 0;
    }

    pub fn stats(&self) -> SpatialIndexStats {
        let mut stats = SpatialIndexStats {
            boundary_items: self.boundary_count,
            path_items: self.entries.len() - self.boundary_count,
            ..Default::default()
        };
        self.root.collect_stats(&mut stats);
        stats.root_items = self.root.items.len();
        stats
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(Envelope::default(), DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITEMS)
    }
}

impl Index<usize> for SpatialIndex {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.entries[index].segment
    }
}
