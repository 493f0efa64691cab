//! Room outlines and obstacles.
//!
//! A [`Boundary`] is built from [`BoundaryPart`]s (or a plain polygon), then
//! turned into a [`Region`]: optionally grown or shrunk with
//! `cavalier_contours`, arcs flattened, and obstacles either kept as holes or
//! cut out of the outline.

mod edge;
mod part;
mod region;

pub use edge::{ArcEdge, Edge, EdgeGeometry, StraightEdge};
pub use part::BoundaryPart;
pub use region::Region;

use cavalier_contours::polyline::{
    BooleanOp, PlineOrientation, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use floorcoil_core::{GeometryError, Vec2};
use region::{ring_contains, rings_cross, signed_area};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, warn};

/// Chords per full turn when arcs are sampled directly.
pub const ARC_STEPS: usize = 16;

/// Maximum chord deviation when cavalier output arcs are flattened.
pub const ARC_FLATTEN_ERROR: f64 = 0.005;

const CLOSE_TOLERANCE: f64 = 1e-6;

/// Chain of outline edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    edges: Vec<Edge>,
    closed: bool,
}

impl Boundary {
    /// Chains `parts` starting at the origin.
    ///
    /// When `closed` is set and the chain does not end where it started, a
    /// straight closing edge is appended.
    pub fn from_parts(parts: &[BoundaryPart], closed: bool) -> Result<Self, GeometryError> {
        if parts.is_empty() {
            return Err(GeometryError::DegenerateBoundary(
                "boundary has no parts".to_string(),
            ));
        }

        let mut edges = Vec::with_capacity(parts.len() + 1);
        let mut position = Vec2::ZERO;
        let mut tangent = Vec2::new(1.0, 0.0);

        for (index, part) in parts.iter().enumerate() {
            if let Some(reason) = part.problem() {
                return Err(GeometryError::InvalidPart { index, reason });
            }
            let heading = part.heading().to_radians();
            let direction = if index == 0 {
                Vec2::from_angle(heading)
            } else {
                tangent.rotated(heading)
            };

            let edge = match *part {
                BoundaryPart::Straight { length, .. } => {
                    Edge::Straight(StraightEdge::new(position, position + direction * length))
                }
                BoundaryPart::Arc { radius, sweep, .. } => Edge::Arc(ArcEdge::from_tangent(
                    position,
                    direction,
                    radius,
                    sweep.to_radians(),
                )),
            };
            position = edge.end();
            tangent = edge.tangent_at(1.0);
            edges.push(edge);
        }

        if closed && position.distance(Vec2::ZERO) > CLOSE_TOLERANCE {
            edges.push(Edge::Straight(StraightEdge::new(position, Vec2::ZERO)));
        }

        Ok(Self { edges, closed })
    }

    /// Closed outline through the given vertices.
    pub fn from_polygon(points: &[Vec2]) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::DegenerateBoundary(format!(
                "polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        let edges = (0..points.len())
            .map(|i| Edge::Straight(StraightEdge::new(points[i], points[(i + 1) % points.len()])))
            .filter(|e| e.length() > CLOSE_TOLERANCE)
            .collect();
        Ok(Self {
            edges,
            closed: true,
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn length(&self) -> f64 {
        self.edges.iter().map(EdgeGeometry::length).sum()
    }

    /// Vertices with arcs sampled at [`ARC_STEPS`] chords per turn.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.edges.iter().flat_map(|e| e.flatten(ARC_STEPS)).collect()
    }

    /// Closed polyline with arcs carried as bulges.
    pub fn to_polyline(&self) -> Polyline {
        let mut polyline = Polyline::new();
        for edge in &self.edges {
            match edge {
                Edge::Straight(s) => polyline.add(s.from.x, s.from.y, 0.0),
                Edge::Arc(arc) => {
                    // Bulges are only defined up to a half turn.
                    let pieces = (arc.sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
                    let bulge = (arc.sweep / pieces as f64 / 4.0).tan();
                    for i in 0..pieces {
                        let p = arc.point_at(i as f64 / pieces as f64);
                        polyline.add(p.x, p.y, bulge);
                    }
                }
            }
        }
        polyline.set_is_closed(true);
        polyline
    }

    /// Builds the fillable region.
    ///
    /// `offset` grows the outline (negative shrinks). Obstacles fully inside
    /// become holes, obstacles crossing the outline are subtracted from it and
    /// obstacles entirely outside are ignored.
    pub fn to_region(&self, offset: f64, obstacles: &[Vec<Vec2>]) -> Result<Region, GeometryError> {
        if !self.closed {
            return Err(GeometryError::DegenerateBoundary(
                "boundary must be closed".to_string(),
            ));
        }

        let mut outer = if offset == 0.0 && self.edges.iter().all(|e| matches!(e, Edge::Straight(_))) {
            self.vertices()
        } else {
            self.offset_outline(offset)?
        };
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let mut contained = Vec::new();
        for (i, obstacle) in obstacles.iter().enumerate() {
            if obstacle.len() < 3 || signed_area(obstacle).abs() <= f64::EPSILON {
                return Err(GeometryError::DegenerateBoundary(format!(
                    "obstacle #{} needs 3 vertices and non-zero area",
                    i
                )));
            }
            if rings_cross(&outer, obstacle) {
                outer = subtract(&outer, obstacle)?;
            } else if obstacle.iter().all(|p| ring_contains(&outer, *p)) {
                contained.push(obstacle.clone());
            } else if outer.iter().all(|p| ring_contains(obstacle, *p)) {
                return Err(GeometryError::EmptyRegion(format!(
                    "obstacle #{} covers the whole boundary",
                    i
                )));
            } else {
                debug!("Obstacle #{} lies outside the boundary, ignored", i);
            }
        }

        // Cuts made after an obstacle was classified can bring the outline
        // into contact with it.
        let mut holes = Vec::with_capacity(contained.len());
        for obstacle in contained {
            if rings_cross(&outer, &obstacle) {
                outer = subtract(&outer, &obstacle)?;
            } else {
                holes.push(obstacle);
            }
        }

        Region::new(outer, holes)
    }

    fn offset_outline(&self, offset: f64) -> Result<Vec<Vec2>, GeometryError> {
        let mut polyline = self.to_polyline();
        if polyline.orientation() == PlineOrientation::Clockwise {
            polyline.invert_direction_mut();
        }
        if offset == 0.0 {
            return Ok(flatten(&polyline));
        }

        // Counter-clockwise outline: positive cavalier offsets go inward.
        let pieces = polyline.parallel_offset(-offset);
        if pieces.len() > 1 {
            warn!(
                "Offset of {} split the boundary into {} pieces, keeping the largest",
                offset,
                pieces.len()
            );
        }
        pieces
            .iter()
            .max_by(|a, b| a.area().abs().total_cmp(&b.area().abs()))
            .map(flatten)
            .ok_or_else(|| {
                GeometryError::EmptyRegion(format!("offset of {} leaves nothing to fill", offset))
            })
    }
}

fn polyline_from_ring(ring: &[Vec2]) -> Polyline {
    let mut polyline = Polyline::new();
    for p in ring {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    polyline
}

fn flatten(polyline: &Polyline) -> Vec<Vec2> {
    let lines = polyline.arcs_to_approx_lines(ARC_FLATTEN_ERROR);
    lines
        .as_ref()
        .unwrap_or(polyline)
        .vertex_data
        .iter()
        .map(|v| Vec2::new(v.x, v.y))
        .collect()
}

fn subtract(outer: &[Vec2], obstacle: &[Vec2]) -> Result<Vec<Vec2>, GeometryError> {
    let outline = polyline_from_ring(outer);
    let mut cutter = polyline_from_ring(obstacle);
    if cutter.orientation() == PlineOrientation::Clockwise {
        cutter.invert_direction_mut();
    }

    let result = outline.boolean(&cutter, BooleanOp::Not);
    if result.pos_plines.len() > 1 {
        warn!(
            "Obstacle splits the region into {} pieces, keeping the largest",
            result.pos_plines.len()
        );
    }
    result
        .pos_plines
        .iter()
        .map(|r| &r.pline)
        .max_by(|a, b| a.area().abs().total_cmp(&b.area().abs()))
        .map(flatten)
        .ok_or_else(|| GeometryError::EmptyRegion("obstacle removes the whole region".to_string()))
}
