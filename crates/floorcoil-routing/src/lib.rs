//! # floorcoil-routing
//!
//! Lays a single continuous pipe through a [`Region`] at a fixed spacing.
//!
//! The router walks a [`Turtle`] along the walls, always keeping the wall on
//! the same side, and turns inward each time the next wall (or an earlier run
//! of pipe) gets in the way. When the spiral can no longer advance it may walk
//! back out between the runs it already laid.
//!
//! [`Region`]: floorcoil_designer::Region

pub mod cancel;
pub mod params;
pub mod path_finder;
pub mod probe;
pub mod router;
pub mod turtle;

pub use cancel::CancellationToken;
pub use params::{Handedness, ProbeTuning, RoutingParameters};
pub use path_finder::{PathFinder, RouteState, RouteStatus};
pub use probe::{Clearance, ForwardProbe, FORWARD_PROBES};
pub use router::{CoilRouter, RouteOutcome};
pub use turtle::Turtle;
