use crate::spatial_index::{SegmentKind, SpatialIndex};
use floorcoil_core::{Envelope, GeometryError, IndexError, Segment, Vec2};
use tracing::debug;

const DEDUP_TOLERANCE: f64 = 1e-9;
const INDEX_MAX_DEPTH: usize = 8;
const INDEX_MAX_ITEMS: usize = 16;

/// The fillable area: one counter-clockwise outer ring and any number of
/// clockwise holes. Rings are stored open (the first vertex is not repeated).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    outer: Vec<Vec2>,
    holes: Vec<Vec<Vec2>>,
}

impl Region {
    /// Normalizes ring orientation and drops repeated vertices.
    pub fn new(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> Result<Self, GeometryError> {
        let mut outer = clean_ring(outer);
        if outer.len() < 3 || signed_area(&outer).abs() <= f64::EPSILON {
            return Err(GeometryError::DegenerateBoundary(format!(
                "outer ring needs 3 vertices and non-zero area, got {} vertices",
                outer.len()
            )));
        }
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let mut rings = Vec::with_capacity(holes.len());
        for (i, hole) in holes.into_iter().enumerate() {
            let mut hole = clean_ring(hole);
            if hole.len() < 3 || signed_area(&hole).abs() <= f64::EPSILON {
                return Err(GeometryError::DegenerateBoundary(format!(
                    "hole #{} needs 3 vertices and non-zero area",
                    i
                )));
            }
            if signed_area(&hole) > 0.0 {
                hole.reverse();
            }
            rings.push(hole);
        }

        Ok(Self {
            outer,
            holes: rings,
        })
    }

    pub fn outer(&self) -> &[Vec2] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<Vec2>] {
        &self.holes
    }

    pub fn outer_edges(&self) -> Vec<Segment> {
        ring_edges(&self.outer)
    }

    /// Outer edges first, then each hole in order.
    pub fn edges(&self) -> Vec<Segment> {
        let mut edges = ring_edges(&self.outer);
        for hole in &self.holes {
            edges.extend(ring_edges(hole));
        }
        edges
    }

    /// Outer area minus hole areas.
    pub fn area(&self) -> f64 {
        signed_area(&self.outer).abs() - self.holes.iter().map(|h| signed_area(h).abs()).sum::<f64>()
    }

    pub fn perimeter(&self) -> f64 {
        self.outer_edges().iter().map(Segment::length).sum()
    }

    pub fn extent(&self) -> Envelope {
        Envelope::enclosing(self.outer.iter().copied())
            .unwrap_or_else(|| Envelope::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Inside the outer ring and outside every hole.
    pub fn contains_point(&self, p: Vec2) -> bool {
        ring_contains(&self.outer, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }

    /// Segment index pre-loaded with every region edge as a boundary segment,
    /// outer ring first.
    pub fn build_index(&self, margin: f64) -> Result<SpatialIndex, IndexError> {
        let bounds = self.extent().expanded(margin);
        let mut index = SpatialIndex::new(bounds, INDEX_MAX_DEPTH, INDEX_MAX_ITEMS);
        for edge in self.edges() {
            index.push(edge, SegmentKind::Boundary)?;
        }
        debug!("Indexed {} boundary edges", index.boundary_count());
        Ok(index)
    }
}

pub(crate) fn ring_edges(ring: &[Vec2]) -> Vec<Segment> {
    (0..ring.len())
        .map(|i| Segment::from_points(ring[i], ring[(i + 1) % ring.len()]))
        .collect()
}

/// Shoelace area, positive for counter-clockwise rings.
pub(crate) fn signed_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        sum += ring[i].cross(ring[(i + 1) % ring.len()]);
    }
    sum / 2.0
}

/// Even-odd ray cast.
pub(crate) fn ring_contains(ring: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when any edge of `a` properly crosses or touches an edge of `b`.
pub(crate) fn rings_cross(a: &[Vec2], b: &[Vec2]) -> bool {
    let eb = ring_edges(b);
    ring_edges(a).iter().any(|sa| {
        eb.iter().any(|sb| {
            sa.envelope().intersects(sb.envelope())
                && sa
                    .intersect(sb)
                    .is_some_and(|hit| (0.0..=1.0).contains(&hit.u) && (0.0..=1.0).contains(&hit.v))
        })
    })
}

fn clean_ring(points: Vec<Vec2>) -> Vec<Vec2> {
    let mut ring: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last().is_none_or(|last| last.distance(p) > DEDUP_TOLERANCE) {
            ring.push(p);
        }
    }
    while ring.len() > 1
        && ring
            .first()
            .zip(ring.last())
            .is_some_and(|(first, last)| first.distance(*last) <= DEDUP_TOLERANCE)
    {
        ring.pop();
    }
    ring
}
