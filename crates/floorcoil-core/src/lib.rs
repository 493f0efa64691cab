//! # floorcoil-core
//!
//! Geometry primitives shared by the floorcoil crates: a plain 2D vector,
//! axis-aligned envelopes and parametric segments with the intersection and
//! projection algebra the coil router is built on.
//!
//! Also hosts the structured error types used across the workspace.

pub mod error;
pub mod geometry;

pub use error::{ConfigError, Error, GeometryError, IndexError, Result};
pub use geometry::{
    Envelope, Intersection, Segment, Vec2, CONSUME_U_MAX, GUIDE_V_MAX, GUIDE_V_MIN, POINT_TOLERANCE,
};
