//! Fillets for the finished coil.
//!
//! Pipe cannot follow a sharp corner, so every interior vertex of the routed
//! polyline is replaced with a sampled arc. The radius shrinks where the
//! neighbouring runs are too short to hold it.

use floorcoil_core::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fillet settings; `angle_step` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerRounding {
    pub radius: f64,
    pub angle_step: f64,
}

impl Default for CornerRounding {
    fn default() -> Self {
        Self {
            radius: 0.1,
            angle_step: 12.0,
        }
    }
}

impl CornerRounding {
    pub fn apply(&self, points: &[Vec2]) -> Vec<Vec2> {
        round_corners(points, self.radius, self.angle_step)
    }
}

/// Replaces interior vertices with arcs of at most `radius`.
///
/// Endpoints are kept. Collinear, reversing or zero-length corners are left
/// untouched. Each fillet may use at most half of either adjacent run.
pub fn round_corners(points: &[Vec2], radius: f64, angle_step: f64) -> Vec<Vec2> {
    if points.len() < 3 || radius <= 0.0 || angle_step <= 0.0 {
        return points.to_vec();
    }
    let step = angle_step.to_radians();

    let mut out = Vec::with_capacity(points.len() * 4);
    out.push(points[0]);
    for w in points.windows(3) {
        let (a, b, c) = (w[0], w[1], w[2]);
        match fillet(a, b, c, radius, step) {
            Some(arc) => out.extend(arc),
            None => out.push(b),
        }
    }
    out.push(points[points.len() - 1]);
    out
}

fn fillet(a: Vec2, b: Vec2, c: Vec2, radius: f64, step: f64) -> Option<Vec<Vec2>> {
    let (la, lc) = (a.distance(b), c.distance(b));
    if la == 0.0 || lc == 0.0 {
        return None;
    }
    let d1 = (a - b) * (1.0 / la);
    let d2 = (c - b) * (1.0 / lc);
    // Interior angle between the two runs.
    let theta = d1.dot(d2).clamp(-1.0, 1.0).acos();
    if theta < 1e-6 || PI - theta < 1e-6 {
        return None;
    }

    let half_tan = (theta / 2.0).tan();
    let max_setback = 0.5 * la.min(lc);
    let r = radius.min(max_setback * half_tan);
    let setback = r / half_tan;

    let t1 = b + d1 * setback;
    let bisector = (d1 + d2).normalized();
    let center = b + bisector * (r / (theta / 2.0).sin());

    let turn = (b - a).cross(c - b).signum();
    let sweep = turn * (PI - theta);
    let steps = (sweep.abs() / step).ceil().max(1.0) as usize;
    let start_angle = (t1 - center).angle();

    Some(
        (0..=steps)
            .map(|i| center + Vec2::from_angle(start_angle + sweep * i as f64 / steps as f64) * r)
            .collect(),
    )
}
