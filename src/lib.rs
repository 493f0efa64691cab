//! # floorcoil
//!
//! Lays out radiant-floor heating pipe: one continuous serpentine coil that
//! fills a room outline at a fixed spacing, steering around obstacles.
//!
//! ## Architecture
//!
//! 1. **floorcoil-core** - vectors, segments, envelopes and error types
//! 2. **floorcoil-designer** - room outlines, regions, the segment index, corner rounding
//! 3. **floorcoil-routing** - the wall-following router
//! 4. **floorcoil-settings** - JSON/TOML job files
//! 5. **floorcoil** - logging setup and the command line front end

use std::path::Path;

pub use floorcoil_core::{ConfigError, Error, GeometryError, IndexError, Result, Segment, Vec2};
pub use floorcoil_designer::{Boundary, BoundaryPart, CornerRounding, Region, SpatialIndex};
pub use floorcoil_routing::{
    CancellationToken, CoilRouter, Handedness, PathFinder, ProbeTuning, RouteOutcome, RouteStatus,
    RoutingParameters,
};
pub use floorcoil_settings::{RoutingJob, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so routed output on stdout stays machine readable.
/// `RUST_LOG` adds directives on top of the INFO default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Loads the job at `path` and routes it.
pub fn run_job(path: &Path) -> anyhow::Result<RouteOutcome> {
    let job = RoutingJob::load_from_file(path)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    let outcome = job.route()?;
    if !outcome.is_complete() {
        tracing::warn!(
            "Route for {} ended early: {:?}",
            path.display(),
            outcome.status
        );
    }
    Ok(outcome)
}

/// Writes `outcome` as pretty JSON to `path`.
pub fn write_outcome(outcome: &RouteOutcome, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}
