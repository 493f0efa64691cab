//! Probe definitions shared by the forward and backward walks.

use floorcoil_core::{Segment, CONSUME_U_MAX, GUIDE_V_MAX, GUIDE_V_MIN};
use floorcoil_designer::SpatialIndex;

/// Side the turtle turns to after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Gap kept to a wall, in spacings, depending on what the wall is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    pub boundary: f64,
    pub path: f64,
}

impl Clearance {
    /// Half a spacing from boundaries, a full spacing from laid pipe.
    pub const FORWARD: Clearance = Clearance {
        boundary: 0.5,
        path: 1.0,
    };
    /// The way back runs between two laid runs.
    pub const BACKWARD: Clearance = Clearance {
        boundary: 0.25,
        path: 0.5,
    };

    pub fn for_segment(&self, index: &SpatialIndex, segment: usize) -> f64 {
        if index.is_boundary(segment) {
            self.boundary
        } else {
            self.path
        }
    }
}

/// Checks run after the basic clearance step, in this order. The first one
/// that finds something closer replaces the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardProbe {
    /// Boundary edge ahead, probed one offset to the left.
    BoundaryObstacle,
    /// Laid pipe ahead, probed further to the left.
    PipeObstacle,
    /// Anything straight ahead within reach.
    FrontHit,
    /// Boundary too close on the right while turning right.
    RightObstacle,
    /// Pipe too close on the right while turning right.
    RightPipe,
}

pub const FORWARD_PROBES: [ForwardProbe; 5] = [
    ForwardProbe::BoundaryObstacle,
    ForwardProbe::PipeObstacle,
    ForwardProbe::FrontHit,
    ForwardProbe::RightObstacle,
    ForwardProbe::RightPipe,
];

impl ForwardProbe {
    pub fn applies(self, turn: Turn) -> bool {
        match self {
            ForwardProbe::RightObstacle | ForwardProbe::RightPipe => turn == Turn::Right,
            _ => true,
        }
    }

    /// Whether the probe is satisfied by boundary edges (as opposed to pipe).
    pub fn wants_boundary(self) -> Option<bool> {
        match self {
            ForwardProbe::BoundaryObstacle | ForwardProbe::RightObstacle => Some(true),
            ForwardProbe::PipeObstacle | ForwardProbe::RightPipe => Some(false),
            ForwardProbe::FrontHit => None,
        }
    }

    /// Extra distance, in spacings, between the clearance line and the guide
    /// line the lateral probes stop at.
    pub(crate) fn guide_extra(self) -> f64 {
        match self {
            ForwardProbe::BoundaryObstacle => 0.5,
            ForwardProbe::PipeObstacle => 1.5,
            _ => 0.0,
        }
    }

    /// How far, in spacings, the right-hand probes back off a wall that is
    /// too close.
    pub(crate) fn right_backoff(self) -> f64 {
        match self {
            ForwardProbe::RightObstacle => 0.5,
            ForwardProbe::RightPipe => 1.0,
            _ => 0.0,
        }
    }
}

/// A probe crossing an indexed segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    /// Parameter along the probe.
    pub u: f64,
    /// Parameter along the struck segment.
    pub v: f64,
}

/// First segment crossed by `probe` strictly ahead of its origin, skipping
/// `skip`. The crossing must lie on the struck segment.
pub(crate) fn consume_hit(
    index: &SpatialIndex,
    probe: &Segment,
    tolerance: f64,
    skip: Option<usize>,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for i in index.query_segment(probe, tolerance) {
        if Some(i) == skip {
            continue;
        }
        let Some(hit) = probe.intersect(&index[i]) else {
            continue;
        };
        let ahead = hit.u > 0.0 && hit.u <= CONSUME_U_MAX;
        let on_segment = hit.v >= GUIDE_V_MIN && hit.v <= GUIDE_V_MAX;
        if ahead && on_segment && best.is_none_or(|b| hit.u < b.u) {
            best = Some(Hit {
                index: i,
                u: hit.u,
                v: hit.v,
            });
        }
    }
    best
}
