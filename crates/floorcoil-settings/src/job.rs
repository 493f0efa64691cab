//! Job files.
//!
//! A job carries the outline either as parametric [`BoundaryPart`]s or as a
//! plain polygon, plus obstacles and [`RoutingParameters`]. Files are JSON or
//! TOML, picked by extension, and always validated on load and save.

use crate::error::{SettingsError, SettingsResult};
use floorcoil_core::Vec2;
use floorcoil_designer::{Boundary, BoundaryPart, Region};
use floorcoil_routing::{CancellationToken, CoilRouter, RouteOutcome, RoutingParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// A room to route, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Close a parametric outline back to its start.
    pub closed: bool,
    /// Grows the outline when positive, shrinks it when negative.
    pub offset: f64,
    pub parts: Vec<BoundaryPart>,
    pub polygon: Vec<Vec2>,
    pub obstacles: Vec<Vec<Vec2>>,
    pub params: RoutingParameters,
}

impl Default for RoutingJob {
    fn default() -> Self {
        Self {
            name: None,
            closed: true,
            offset: 0.0,
            parts: Vec::new(),
            polygon: Vec::new(),
            obstacles: Vec::new(),
            params: RoutingParameters::default(),
        }
    }
}

impl RoutingJob {
    pub fn from_parts(parts: Vec<BoundaryPart>) -> Self {
        Self {
            parts,
            ..Self::default()
        }
    }

    pub fn from_polygon(polygon: Vec<Vec2>) -> Self {
        Self {
            polygon,
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: RoutingParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_obstacle(mut self, obstacle: Vec<Vec2>) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Load a job from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let job: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        job.validate()?;
        debug!("Loaded job from {}", path.display());
        Ok(job)
    }

    /// Save the job to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        match (self.parts.is_empty(), self.polygon.is_empty()) {
            (true, true) => {
                return Err(invalid("parts", "either parts or polygon is required"));
            }
            (false, false) => {
                return Err(invalid("polygon", "cannot be combined with parts"));
            }
            _ => {}
        }
        if !self.polygon.is_empty() && self.polygon.len() < 3 {
            return Err(invalid("polygon", "needs at least 3 vertices"));
        }
        if !self.polygon.iter().all(|p| p.is_finite()) {
            return Err(invalid("polygon", "vertices must be finite"));
        }
        if !self.offset.is_finite() {
            return Err(invalid("offset", "must be finite"));
        }
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if obstacle.len() < 3 {
                return Err(invalid(
                    &format!("obstacles[{}]", i),
                    "needs at least 3 vertices",
                ));
            }
            if !obstacle.iter().all(|p| p.is_finite()) {
                return Err(invalid(&format!("obstacles[{}]", i), "vertices must be finite"));
            }
        }
        self.params
            .validate()
            .map_err(|e| SettingsError::Core(e.into()))
    }

    pub fn boundary(&self) -> SettingsResult<Boundary> {
        let boundary = if self.polygon.is_empty() {
            Boundary::from_parts(&self.parts, self.closed)?
        } else {
            Boundary::from_polygon(&self.polygon)?
        };
        Ok(boundary)
    }

    pub fn region(&self) -> SettingsResult<Region> {
        Ok(self.boundary()?.to_region(self.offset, &self.obstacles)?)
    }

    pub fn route(&self) -> SettingsResult<RouteOutcome> {
        self.route_with(None)
    }

    pub fn route_with(&self, cancel: Option<CancellationToken>) -> SettingsResult<RouteOutcome> {
        self.validate()?;
        let region = self.region()?;
        let mut router = CoilRouter::new(self.params.clone())?;
        if let Some(token) = cancel {
            router = router.with_cancellation(token);
        }
        info!(
            "Routing job {} (area {:.2})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            region.area()
        );
        Ok(router.route(&region)?)
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidJob {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
