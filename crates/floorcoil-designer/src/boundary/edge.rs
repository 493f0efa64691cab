use floorcoil_core::{Segment, Vec2};
use std::f64::consts::PI;

/// Shared behaviour of outline edges; `t` runs from 0 at the start to 1 at
/// the end of the edge.
pub trait EdgeGeometry {
    fn length(&self) -> f64;
    fn point_at(&self, t: f64) -> Vec2;
    /// Unit tangent in the direction of travel.
    fn tangent_at(&self, t: f64) -> Vec2;
    /// Parallel copy; positive distances move to the left of travel.
    fn offset(&self, distance: f64) -> Self
    where
        Self: Sized;

    fn start(&self) -> Vec2 {
        self.point_at(0.0)
    }

    fn end(&self) -> Vec2 {
        self.point_at(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightEdge {
    pub from: Vec2,
    pub to: Vec2,
}

impl StraightEdge {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    pub fn segment(&self) -> Segment {
        Segment::from_points(self.from, self.to)
    }
}

impl EdgeGeometry for StraightEdge {
    fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    fn point_at(&self, t: f64) -> Vec2 {
        self.from + (self.to - self.from) * t
    }

    fn tangent_at(&self, _t: f64) -> Vec2 {
        (self.to - self.from).normalized()
    }

    fn offset(&self, distance: f64) -> Self {
        let n = self.tangent_at(0.0).perp_left() * distance;
        StraightEdge::new(self.from + n, self.to + n)
    }
}

/// Circular arc around `center`; angles in radians, positive sweep is
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEdge {
    pub center: Vec2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl ArcEdge {
    /// Arc leaving `start` along `tangent` (unit) with the given radius and
    /// sweep in radians.
    pub fn from_tangent(start: Vec2, tangent: Vec2, radius: f64, sweep: f64) -> Self {
        let to_center = if sweep >= 0.0 {
            tangent.perp_left()
        } else {
            tangent.perp_right()
        };
        let center = start + to_center * radius;
        Self {
            center,
            radius,
            start_angle: (start - center).angle(),
            sweep,
        }
    }

    /// Cavalier-style bulge, `tan(sweep / 4)`.
    pub fn bulge(&self) -> f64 {
        (self.sweep / 4.0).tan()
    }

    pub fn is_ccw(&self) -> bool {
        self.sweep >= 0.0
    }
}

impl EdgeGeometry for ArcEdge {
    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn point_at(&self, t: f64) -> Vec2 {
        self.center + Vec2::from_angle(self.start_angle + self.sweep * t) * self.radius
    }

    fn tangent_at(&self, t: f64) -> Vec2 {
        let radial = Vec2::from_angle(self.start_angle + self.sweep * t);
        if self.is_ccw() {
            radial.perp_left()
        } else {
            radial.perp_right()
        }
    }

    fn offset(&self, distance: f64) -> Self {
        let radius = if self.is_ccw() {
            self.radius - distance
        } else {
            self.radius + distance
        };
        ArcEdge {
            radius: radius.max(0.0),
            ..*self
        }
    }
}

/// Outline edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Straight(StraightEdge),
    Arc(ArcEdge),
}

impl Edge {
    pub fn bulge(&self) -> f64 {
        match self {
            Edge::Straight(_) => 0.0,
            Edge::Arc(arc) => arc.bulge(),
        }
    }

    /// Points along the edge, excluding the end point. Arcs are split into
    /// `steps` chords, scaled down for short sweeps.
    pub fn flatten(&self, steps: usize) -> Vec<Vec2> {
        match self {
            Edge::Straight(s) => vec![s.from],
            Edge::Arc(arc) => {
                let n = ((steps as f64) * arc.sweep.abs() / (2.0 * PI)).ceil().max(1.0) as usize;
                (0..n).map(|i| arc.point_at(i as f64 / n as f64)).collect()
            }
        }
    }
}

impl EdgeGeometry for Edge {
    fn length(&self) -> f64 {
        match self {
            Edge::Straight(s) => s.length(),
            Edge::Arc(a) => a.length(),
        }
    }

    fn point_at(&self, t: f64) -> Vec2 {
        match self {
            Edge::Straight(s) => s.point_at(t),
            Edge::Arc(a) => a.point_at(t),
        }
    }

    fn tangent_at(&self, t: f64) -> Vec2 {
        match self {
            Edge::Straight(s) => s.tangent_at(t),
            Edge::Arc(a) => a.tangent_at(t),
        }
    }

    fn offset(&self, distance: f64) -> Self {
        match self {
            Edge::Straight(s) => Edge::Straight(s.offset(distance)),
            Edge::Arc(a) => Edge::Arc(a.offset(distance)),
        }
    }
}
