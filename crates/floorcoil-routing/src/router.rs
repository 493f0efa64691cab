//! Front door: region in, coil out.

use crate::cancel::CancellationToken;
use crate::params::{Handedness, RoutingParameters};
use crate::path_finder::{PathFinder, RouteStatus};
use floorcoil_core::{Error, GeometryError, Result, Vec2};
use floorcoil_designer::{Boundary, Region};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Padding around the region extent, in spacings, for the index root.
const INDEX_MARGIN: f64 = 4.0;

/// A finished (or interrupted) route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    /// Final path, rounded when corner rounding is enabled.
    pub points: Vec<Vec2>,
    /// Path as produced by the walk, before rounding.
    pub raw_points: Vec<Vec2>,
    pub status: RouteStatus,
    pub iterations: usize,
    pub max_iterations: usize,
    /// Length of `points`.
    pub path_length: f64,
    /// Area of the region the coil was laid in.
    pub filled_area: f64,
}

impl RouteOutcome {
    pub fn points_3d(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| p.to_3d()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.status == RouteStatus::Completed
    }
}

/// Sum of the distances between consecutive points.
pub fn polyline_length(points: &[Vec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Routes coils through regions with fixed parameters.
#[derive(Debug, Clone)]
pub struct CoilRouter {
    params: RoutingParameters,
    cancel: Option<CancellationToken>,
}

impl CoilRouter {
    pub fn new(params: RoutingParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            cancel: None,
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn params(&self) -> &RoutingParameters {
        &self.params
    }

    /// Iteration cap for `region`: the explicit cap when set, otherwise one
    /// step per spacing-sized cell of the region extent.
    pub fn iteration_cap(&self, region: &Region) -> usize {
        self.params.max_iterations.unwrap_or_else(|| {
            let extent = region.extent();
            let cells = extent.width() * extent.height() / (self.params.spacing * self.params.spacing);
            (cells.ceil() as usize).max(1)
        })
    }

    /// Entry point and initial heading.
    ///
    /// The entry lies half a spacing inside the outer ring edge found
    /// `start_location` along the ring, kept at least half a spacing from
    /// either end of that edge.
    pub fn start_frame(&self, region: &Region) -> Option<(Vec2, Vec2)> {
        let spacing = self.params.spacing;
        let edges = region.outer_edges();
        let perimeter = region.perimeter();
        if perimeter <= 0.0 {
            return None;
        }
        let location = self.params.start_location.rem_euclid(perimeter);

        let mut walked = 0.0;
        for edge in &edges {
            let length = edge.length();
            if length == 0.0 {
                continue;
            }
            if walked + length < location {
                walked += length;
                continue;
            }
            let margin = (0.5 * spacing / length).min(0.5);
            let t = ((location - walked) / length).clamp(margin, 1.0 - margin);
            let along = edge.v().normalized();
            let start = edge.point_at(t) + along.perp_left() * (0.5 * spacing);
            let heading = match self.params.handedness {
                Handedness::Clockwise => along * spacing,
                Handedness::CounterClockwise => along * -spacing,
            };
            return Some((start, heading));
        }
        None
    }

    /// Builds a region from `boundary` and routes it.
    pub fn route_boundary(
        &self,
        boundary: &Boundary,
        offset: f64,
        obstacles: &[Vec<Vec2>],
    ) -> Result<RouteOutcome> {
        let region = boundary.to_region(offset, obstacles)?;
        self.route(&region)
    }

    pub fn route(&self, region: &Region) -> Result<RouteOutcome> {
        let spacing = self.params.spacing;
        let (start, heading) = self.start_frame(region).ok_or_else(|| {
            Error::from(GeometryError::DegenerateBoundary(
                "outer ring has no usable edge".to_string(),
            ))
        })?;
        let max_iterations = self.iteration_cap(region);

        let index = region.build_index(INDEX_MARGIN * spacing)?;
        let mut finder = PathFinder::new(index, start, heading, &self.params, max_iterations);
        if let Some(token) = &self.cancel {
            finder = finder.with_cancellation(token.clone());
        }

        let status = finder.run();
        let iterations = finder.iterations();
        let raw_points = finder.into_points();
        let points = match &self.params.corner_rounding {
            Some(rounding) => rounding.apply(&raw_points),
            None => raw_points.clone(),
        };
        let path_length = polyline_length(&points);

        info!(
            "Routed {} points ({:.2} long) in {} iterations: {:?}",
            points.len(),
            path_length,
            iterations,
            status
        );

        Ok(RouteOutcome {
            points,
            raw_points,
            status,
            iterations,
            max_iterations,
            path_length,
            filled_area: region.area(),
        })
    }
}
