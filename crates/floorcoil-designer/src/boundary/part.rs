use serde::{Deserialize, Serialize};

/// One step of a parametric room outline.
///
/// Angles are in degrees. The first part's `heading` is absolute (measured
/// from +X); every later heading turns the end tangent of the previous part.
/// A negative `sweep` bends clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryPart {
    Straight {
        #[serde(default)]
        heading: f64,
        length: f64,
    },
    Arc {
        #[serde(default)]
        heading: f64,
        radius: f64,
        sweep: f64,
    },
}

impl BoundaryPart {
    pub fn straight(heading: f64, length: f64) -> Self {
        BoundaryPart::Straight { heading, length }
    }

    pub fn arc(heading: f64, radius: f64, sweep: f64) -> Self {
        BoundaryPart::Arc {
            heading,
            radius,
            sweep,
        }
    }

    pub fn heading(&self) -> f64 {
        match *self {
            BoundaryPart::Straight { heading, .. } | BoundaryPart::Arc { heading, .. } => heading,
        }
    }

    /// Reason this part cannot be built, if any.
    pub fn problem(&self) -> Option<String> {
        match *self {
            BoundaryPart::Straight { heading, length } => {
                if !heading.is_finite() {
                    Some("heading must be finite".to_string())
                } else if !(length.is_finite() && length > 0.0) {
                    Some(format!("length must be > 0, got {}", length))
                } else {
                    None
                }
            }
            BoundaryPart::Arc {
                heading,
                radius,
                sweep,
            } => {
                if !heading.is_finite() {
                    Some("heading must be finite".to_string())
                } else if !(radius.is_finite() && radius > 0.0) {
                    Some(format!("radius must be > 0, got {}", radius))
                } else if !sweep.is_finite() || sweep == 0.0 || sweep.abs() > 360.0 {
                    Some(format!("sweep must be within (0, 360] degrees, got {}", sweep))
                } else {
                    None
                }
            }
        }
    }
}
