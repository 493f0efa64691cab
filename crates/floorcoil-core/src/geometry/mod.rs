//! Planar geometry primitives.

mod envelope;
mod segment;
mod vector;

pub use envelope::Envelope;
pub use segment::{Intersection, Segment};
pub use vector::Vec2;

/// Distance under which two points are considered coincident by lookups.
pub const POINT_TOLERANCE: f64 = 1e-4;

/// Upper bound of the parameter along a probe for a hit to be consumed.
pub const CONSUME_U_MAX: f64 = 1.0001;

/// Window of the parameter along the struck segment.
pub const GUIDE_V_MIN: f64 = -0.0001;
/// See [`GUIDE_V_MIN`].
pub const GUIDE_V_MAX: f64 = 1.0001;
