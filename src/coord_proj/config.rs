//! Configuration for [`CoordProj`](super::CoordProj).
//!
//! With the `config` feature the struct reads from YAML; every field is
//! optional and falls back to its default.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config")]
use std::path::Path;

use crate::error::{Error, Result};

/// Default projection: Robinson on WGS84.
pub const DEFAULT_PROJ: &str = "+proj=robin +lon_0=0 +x_0=0 +y_0=0 +ellps=WGS84 +datum=WGS84 +units=m +no_defs";

/// Where the horizontal axis guide is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum HorizontalPosition {
    /// Below the panel.
    #[default]
    Bottom,
    /// Above the panel.
    Top,
}

/// Where the vertical axis guide is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum VerticalPosition {
    /// Left of the panel.
    #[default]
    Left,
    /// Right of the panel.
    Right,
}

/// Projected coordinate system settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct CoordProjConfig {
    /// PROJ string describing the target projection.
    #[cfg_attr(feature = "config", serde(default = "default_proj"))]
    pub proj: String,

    /// Treat input as projected coordinates and map them back to lon/lat.
    #[cfg_attr(feature = "config", serde(default))]
    pub inverse: bool,

    /// Angles are in degrees (radians otherwise).
    #[cfg_attr(feature = "config", serde(default = "default_degrees"))]
    pub degrees: bool,

    /// Ellipsoid used when the PROJ string names none.
    #[cfg_attr(feature = "config", serde(default = "default_ellps"))]
    pub ellps_default: Option<String>,

    /// Longitude limits overriding the data range.
    #[cfg_attr(feature = "config", serde(default))]
    pub xlim: Option<(f64, f64)>,

    /// Latitude limits overriding the data range.
    #[cfg_attr(feature = "config", serde(default))]
    pub ylim: Option<(f64, f64)>,

    /// Side of the longitude guide.
    #[cfg_attr(feature = "config", serde(default))]
    pub x_axis: HorizontalPosition,

    /// Side of the latitude guide.
    #[cfg_attr(feature = "config", serde(default))]
    pub y_axis: VerticalPosition,
}

fn default_proj() -> String {
    DEFAULT_PROJ.to_string()
}
fn default_degrees() -> bool {
    true
}
fn default_ellps() -> Option<String> {
    Some("sphere".to_string())
}

impl Default for CoordProjConfig {
    fn default() -> Self {
        Self {
            proj: default_proj(),
            inverse: false,
            degrees: default_degrees(),
            ellps_default: default_ellps(),
            xlim: None,
            ylim: None,
            x_axis: HorizontalPosition::default(),
            y_axis: VerticalPosition::default(),
        }
    }
}

impl CoordProjConfig {
    /// Default configuration (Robinson).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PROJ string.
    #[must_use]
    pub fn proj(mut self, proj: impl Into<String>) -> Self {
        self.proj = proj.into();
        self
    }

    /// Map projected input back to lon/lat.
    #[must_use]
    pub fn inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Angular unit flag.
    #[must_use]
    pub fn degrees(mut self, degrees: bool) -> Self {
        self.degrees = degrees;
        self
    }

    /// Fallback ellipsoid; `None` requires the PROJ string to name one.
    #[must_use]
    pub fn ellps_default(mut self, ellps: Option<&str>) -> Self {
        self.ellps_default = ellps.map(str::to_string);
        self
    }

    /// Longitude limits.
    #[must_use]
    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    /// Latitude limits.
    #[must_use]
    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    /// Side of the longitude guide.
    #[must_use]
    pub fn x_axis(mut self, position: HorizontalPosition) -> Self {
        self.x_axis = position;
        self
    }

    /// Side of the latitude guide.
    #[must_use]
    pub fn y_axis(mut self, position: VerticalPosition) -> Self {
        self.y_axis = position;
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    #[cfg(feature = "config")]
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Checks the fields that do not depend on the projection backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-finite limits.
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, lim) in [("xlim", self.xlim), ("ylim", self.ylim)] {
            if let Some((a, b)) = lim {
                if !a.is_finite() || !b.is_finite() {
                    return Err(Error::InvalidParameter(format!("{name} must be finite, got ({a}, {b})")));
                }
            }
        }
        Ok(())
    }
}
