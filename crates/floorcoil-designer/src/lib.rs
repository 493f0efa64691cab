//! # floorcoil-designer
//!
//! Everything the router needs to know about the room before it starts
//! walking:
//!
//! 1. **boundary** - parametric outlines (straight runs and arcs), offsetting,
//!    obstacle subtraction and the resulting [`Region`]
//! 2. **spatial_index** - quadtree over boundary and drawn-path segments
//! 3. **corner_rounding** - fillets applied to the finished coil

pub mod boundary;
pub mod corner_rounding;
pub mod spatial_index;

pub use boundary::{
    ArcEdge, Boundary, BoundaryPart, Edge, EdgeGeometry, Region, StraightEdge, ARC_FLATTEN_ERROR,
    ARC_STEPS,
};
pub use corner_rounding::{round_corners, CornerRounding};
pub use spatial_index::{IndexedSegment, SegmentKind, SpatialIndex, SpatialIndexStats};
