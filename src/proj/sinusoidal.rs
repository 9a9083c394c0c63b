//! Sinusoidal (Sanson–Flamsteed) projection, spherical form.
//!
//! forward: x = a·(λ - λ₀)·cos(φ), y = a·φ
//! inverse: λ = λ₀ + x/(a·cos(φ)), φ = y/a

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::adjlon;
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Origin, Projection};

/// Spherical sinusoidal on the ellipsoid's semi-major axis.
#[derive(Debug, Clone)]
pub struct Sinusoidal {
    ellipsoid: Ellipsoid,
    origin: Origin,
}

impl Sinusoidal {
    /// Builds the projection around `origin`; only `a` of the ellipsoid is used.
    pub fn new(ellipsoid: Ellipsoid, origin: Origin) -> Self {
        Self { ellipsoid, origin }
    }
}

impl Projection for Sinusoidal {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(ProjError::OutsideDomain);
        }
        let a = self.ellipsoid.a;
        let lam = adjlon(lon - self.origin.lon0);
        Ok((a * lam * lat.cos() + self.origin.false_easting, a * lat + self.origin.false_northing))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let lat = (y - self.origin.false_northing) / a;
        if !lat.is_finite() || lat.abs() > FRAC_PI_2 + 1e-12 {
            return Err(ProjError::OutsideDomain);
        }
        let cos_lat = lat.cos();
        if cos_lat.abs() < 1e-15 {
            // longitude is undefined at the poles
            return Ok((self.origin.lon0, lat.clamp(-FRAC_PI_2, FRAC_PI_2)));
        }
        let lam = (x - self.origin.false_easting) / (a * cos_lat);
        if lam.abs() > std::f64::consts::PI + 1e-10 {
            return Err(ProjError::OutsideDomain);
        }
        Ok((adjlon(lam + self.origin.lon0), lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
