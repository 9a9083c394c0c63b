//! Cartographic projections.
//!
//! The common families behind `coord_proj` (Robinson, Mollweide, sinusoidal,
//! equirectangular, Mercator, longlat) run natively; every other PROJ string
//! is handed to [`proj4rs`] through [`fallback::Proj4Fallback`].

pub mod common;
pub mod definition;
pub mod ellipsoid;
pub mod equirectangular;
pub mod fallback;
pub mod mercator;
pub mod mollweide;
pub mod projector;
pub mod robinson;
pub mod sinusoidal;

pub use definition::ProjString;
pub use ellipsoid::Ellipsoid;
pub use projector::Projector;

use crate::error::ProjError;

/// Trait for map projections supporting forward and inverse transforms.
///
/// Angles are radians; projected coordinates are metres including the false
/// easting/northing.
pub trait Projection: Send + Sync + std::fmt::Debug {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: (easting, northing) -> (lon_rad, lat_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;

    /// Reference ellipsoid the projection was built with.
    fn ellipsoid(&self) -> &Ellipsoid;
}

/// Projection origin shared by the native projections.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Origin {
    /// Central meridian (radians).
    pub lon0: f64,
    /// Latitude of origin (radians).
    pub lat0: f64,
    /// False easting (metres).
    pub false_easting: f64,
    /// False northing (metres).
    pub false_northing: f64,
}

impl Origin {
    /// Read `+lon_0`, `+lat_0`, `+x_0` and `+y_0` from a definition.
    ///
    /// # Errors
    ///
    /// Returns an error if any of them is not a number.
    pub fn from_definition(def: &ProjString) -> Result<Self, ProjError> {
        Ok(Self {
            lon0: def.get_f64("lon_0")?.unwrap_or(0.0).to_radians(),
            lat0: def.get_f64("lat_0")?.unwrap_or(0.0).to_radians(),
            false_easting: def.get_f64("x_0")?.unwrap_or(0.0),
            false_northing: def.get_f64("y_0")?.unwrap_or(0.0),
        })
    }
}
