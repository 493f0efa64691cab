//! Error types for the core crate.
//!
//! Degenerate geometry inside the router never surfaces here (those paths
//! yield `None`); these errors cover invalid input rejected before routing.

use thiserror::Error;

/// Errors raised while preparing or validating a routing run.
#[derive(Error, Debug)]
pub enum Error {
    /// Boundary or obstacle geometry could not be used.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A routing parameter is out of range.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The spatial index rejected an insertion.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

/// Errors related to boundary and obstacle geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The boundary has too few distinct vertices or zero area.
    #[error("Degenerate boundary: {0}")]
    DegenerateBoundary(String),

    /// A boundary part has an unusable length, radius or sweep.
    #[error("Invalid boundary part #{index}: {reason}")]
    InvalidPart { index: usize, reason: String },

    /// Offsetting or obstacle subtraction left nothing to fill.
    #[error("Empty region: {0}")]
    EmptyRegion(String),
}

/// Errors related to routing parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Spacing must be a finite, strictly positive distance.
    #[error("Invalid spacing: {0} (must be > 0)")]
    InvalidSpacing(f64),

    /// An explicit iteration cap must be at least one.
    #[error("Invalid iteration cap: {0} (must be > 0)")]
    InvalidIterationCap(usize),

    /// Any other parameter with an unusable value.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Errors related to the append-only segment index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    /// Segment indices must grow strictly by one.
    #[error("Non-monotonic segment index {index} (expected {expected})")]
    NonMonotonic { index: usize, expected: usize },

    /// Boundary segments cannot follow drawn-path segments.
    #[error("Boundary segment #{0} inserted after drawn path")]
    BoundaryAfterPath(usize),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
