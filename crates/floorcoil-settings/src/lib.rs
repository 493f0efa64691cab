//! # floorcoil-settings
//!
//! Routing jobs on disk: a room outline, its obstacles and the routing
//! parameters, stored as JSON or TOML.

pub mod error;
pub mod job;

pub use error::{SettingsError, SettingsResult};
pub use job::RoutingJob;
