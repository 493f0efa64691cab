//! Routing parameters.

use floorcoil_core::ConfigError;
use floorcoil_designer::CornerRounding;
use serde::{Deserialize, Serialize};

/// Which way the coil winds when seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Handedness {
    pub fn sign(self) -> f64 {
        match self {
            Handedness::Clockwise => 1.0,
            Handedness::CounterClockwise => -1.0,
        }
    }
}

/// Probe distances, in spacings, used while walking forward.
///
/// The defaults were tuned on rectilinear rooms; they are exposed so odd
/// layouts can be adjusted without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeTuning {
    /// Lateral offset, in spacings, of the probe looking for boundary edges
    /// ahead. Half a spacing keeps it on the lane being walked.
    pub boundary_probe_offset: f64,
    /// Lateral offset of the probe looking for earlier pipe ahead.
    pub pipe_probe_offset: f64,
    /// Extra reach of the front probe beyond the clearance line.
    pub front_reach: f64,
    /// Narrowest boundary gap accepted on a right turn.
    pub right_boundary_limit: f64,
    /// Narrowest pipe gap accepted on a right turn.
    pub right_pipe_limit: f64,
    /// Shortest forward step; anything shorter caps the run.
    pub min_advance: f64,
    /// Length of the clearance probe used while walking back.
    pub backward_probe: f64,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            boundary_probe_offset: 0.5,
            pipe_probe_offset: 1.5,
            front_reach: 2.5,
            right_boundary_limit: 1.5,
            right_pipe_limit: 2.0,
            min_advance: 0.5,
            backward_probe: 0.75,
        }
    }
}

impl ProbeTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("boundary_probe_offset", self.boundary_probe_offset),
            ("pipe_probe_offset", self.pipe_probe_offset),
            ("front_reach", self.front_reach),
            ("right_boundary_limit", self.right_boundary_limit),
            ("right_pipe_limit", self.right_pipe_limit),
            ("min_advance", self.min_advance),
            ("backward_probe", self.backward_probe),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: format!("tuning.{}", name),
                    reason: format!("must be > 0, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Everything the router needs besides the region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingParameters {
    /// Center distance between neighbouring pipe runs.
    pub spacing: f64,
    /// Iteration cap; derived from the region extent when unset.
    pub max_iterations: Option<usize>,
    pub handedness: Handedness,
    /// Walk back out between the laid runs once the spiral is blocked.
    pub allow_backward: bool,
    /// Distance along the outer ring, from its first vertex, where the pipe
    /// enters. Wraps around the perimeter.
    pub start_location: f64,
    pub tuning: ProbeTuning,
    /// Fillet the finished path; `None` keeps sharp corners.
    pub corner_rounding: Option<CornerRounding>,
}

impl Default for RoutingParameters {
    fn default() -> Self {
        Self {
            spacing: 0.3,
            max_iterations: None,
            handedness: Handedness::Clockwise,
            allow_backward: true,
            start_location: 0.1,
            tuning: ProbeTuning::default(),
            corner_rounding: None,
        }
    }
}

impl RoutingParameters {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            ..Default::default()
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn with_backward(mut self, allow: bool) -> Self {
        self.allow_backward = allow;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn with_start_location(mut self, location: f64) -> Self {
        self.start_location = location;
        self
    }

    pub fn with_corner_rounding(mut self, rounding: CornerRounding) -> Self {
        self.corner_rounding = Some(rounding);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::InvalidIterationCap(0));
        }
        if !self.start_location.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "start_location".to_string(),
                reason: "must be finite".to_string(),
            });
        }
        if let Some(rounding) = &self.corner_rounding {
            if !(rounding.radius.is_finite() && rounding.radius >= 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "corner_rounding.radius".to_string(),
                    reason: format!("must be >= 0, got {}", rounding.radius),
                });
            }
            if !(rounding.angle_step.is_finite() && rounding.angle_step > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "corner_rounding.angle_step".to_string(),
                    reason: format!("must be > 0, got {}", rounding.angle_step),
                });
            }
        }
        self.tuning.validate()
    }
}
