use super::{Envelope, Vec2};

/// Result of intersecting the lines carrying two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Intersection point.
    pub point: Vec2,
    /// Parameter along the segment the method was called on.
    pub u: f64,
    /// Parameter along the other segment.
    pub v: f64,
}

/// Directed segment `p -> p + v`.
///
/// The envelope is cached and kept in sync with the endpoints; the fields are
/// only reachable through [`Segment::set`] and the constructors so the cache
/// cannot go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    p: Vec2,
    v: Vec2,
    envelope: Envelope,
}

impl Segment {
    pub fn new(p: Vec2, v: Vec2) -> Self {
        Self {
            p,
            v,
            envelope: Envelope::from_points(p, p + v),
        }
    }

    pub fn from_points(start: Vec2, end: Vec2) -> Self {
        Self::new(start, end - start)
    }

    pub fn p(&self) -> Vec2 {
        self.p
    }

    pub fn v(&self) -> Vec2 {
        self.v
    }

    pub fn start(&self) -> Vec2 {
        self.p
    }

    pub fn end(&self) -> Vec2 {
        self.p + self.v
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn length(&self) -> f64 {
        self.v.length()
    }

    pub fn is_degenerate(&self) -> bool {
        self.v == Vec2::ZERO
    }

    /// Replaces origin and direction, refreshing the envelope.
    pub fn set(&mut self, p: Vec2, v: Vec2) {
        *self = Segment::new(p, v);
    }

    pub fn point_at(&self, t: f64) -> Vec2 {
        self.p + self.v * t
    }

    /// Same direction, origin moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Segment {
        Segment::new(self.p + offset, self.v)
    }

    /// Solves `self.p + u * self.v == other.p + v * other.v`.
    ///
    /// Returns `None` only when the directions are exactly parallel; the
    /// parameters are not range checked.
    pub fn intersect(&self, other: &Segment) -> Option<Intersection> {
        let d = self.v.cross(other.v);
        if d == 0.0 {
            return None;
        }
        let dp = other.p - self.p;
        let u = dp.cross(other.v) / d;
        let v = dp.cross(self.v) / d;
        Some(Intersection {
            point: self.point_at(u),
            u,
            v,
        })
    }

    /// Parameter on `self` where the line carrying `other` crosses it.
    pub fn crossing_param(&self, other: &Segment) -> Option<f64> {
        let d = self.v.cross(other.v);
        if d == 0.0 {
            return None;
        }
        Some((other.p - self.p).cross(other.v) / d)
    }

    /// Projection parameter of `pt` onto the carrying line, 0 when degenerate.
    pub fn param_of(&self, pt: Vec2) -> f64 {
        let len_sq = self.v.length_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        self.v.dot(pt - self.p) / len_sq
    }

    /// Signed perpendicular distance (positive on the left of `v`) and
    /// projection parameter of `pt`.
    pub fn signed_distance(&self, pt: Vec2) -> (f64, f64) {
        let len_sq = self.v.length_squared();
        if len_sq == 0.0 {
            return (0.0, 0.0);
        }
        let dp = pt - self.p;
        (self.v.cross(dp) / len_sq.sqrt(), self.v.dot(dp) / len_sq)
    }

    /// Endpoint of `other` lying farthest along `self`, with its parameter.
    pub fn farthest_point(&self, other: &Segment) -> (f64, Vec2) {
        let (p0, p1) = (other.start(), other.end());
        let (t0, t1) = (self.param_of(p0), self.param_of(p1));
        if t1 > t0 {
            (t1, p1)
        } else {
            (t0, p0)
        }
    }

    /// Endpoint of `other` lying nearest along `self`, with its parameter.
    pub fn nearest_point(&self, other: &Segment) -> (f64, Vec2) {
        let (p0, p1) = (other.start(), other.end());
        let (t0, t1) = (self.param_of(p0), self.param_of(p1));
        if t1 < t0 {
            (t1, p1)
        } else {
            (t0, p0)
        }
    }

    /// Smallest signed distance from this line to either endpoint of `other`.
    pub fn min_distance(&self, other: &Segment) -> f64 {
        let (d0, _) = self.signed_distance(other.start());
        let (d1, _) = self.signed_distance(other.end());
        d0.min(d1)
    }

    /// True when `pt` coincides with either endpoint within `tolerance`.
    pub fn has_endpoint(&self, pt: Vec2, tolerance: f64) -> bool {
        self.p.distance(pt) < tolerance || self.end().distance(pt) < tolerance
    }
}
