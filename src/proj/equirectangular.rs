//! Equirectangular (Plate Carrée) projection.
//!
//! forward: x = a·(λ - λ₀)·cos(φ_ts), y = a·(φ - φ₀)
//! inverse: λ = λ₀ + x/(a·cos(φ_ts)), φ = φ₀ + y/a

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::adjlon;
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Origin, Projection};

/// Latitudes this close to a pole have no usable x scale.
const POLE_EPS: f64 = 1e-10;

/// Plate Carrée with an optional true-scale parallel.
#[derive(Debug, Clone)]
pub struct Equirectangular {
    ellipsoid: Ellipsoid,
    origin: Origin,
    cos_lat_ts: f64,
}

impl Equirectangular {
    /// `lat_ts` is the true-scale parallel in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if `lat_ts` is at or beyond a pole.
    pub fn new(ellipsoid: Ellipsoid, origin: Origin, lat_ts: f64) -> Result<Self, ProjError> {
        if !lat_ts.is_finite() || lat_ts.abs() >= FRAC_PI_2 - POLE_EPS {
            return Err(ProjError::InvalidDefinition {
                definition: format!("+proj=eqc +lat_ts={}", lat_ts.to_degrees()),
                reason: "lat_ts must be inside (-90, 90)".into(),
            });
        }
        Ok(Self { ellipsoid, origin, cos_lat_ts: lat_ts.cos() })
    }
}

impl Projection for Equirectangular {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(ProjError::OutsideDomain);
        }
        let a = self.ellipsoid.a;
        let lam = adjlon(lon - self.origin.lon0);
        Ok((
            a * lam * self.cos_lat_ts + self.origin.false_easting,
            a * (lat - self.origin.lat0) + self.origin.false_northing,
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let lon = (x - self.origin.false_easting) / (a * self.cos_lat_ts);
        let lat = self.origin.lat0 + (y - self.origin.false_northing) / a;
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjError::OutsideDomain);
        }
        Ok((adjlon(lon + self.origin.lon0), lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_parallel_scales_x() {
        let lat_ts = 30.0_f64.to_radians();
        let proj = Equirectangular::new(WGS84, Origin::default(), lat_ts).unwrap();
        let (x, _) = proj.forward(1.0_f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(x, WGS84.a * 1.0_f64.to_radians() * lat_ts.cos(), epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let origin = Origin { lon0: 0.2, lat0: 0.1, false_easting: 500.0, false_northing: -20.0 };
        let proj = Equirectangular::new(WGS84, origin, 0.0).unwrap();
        let (x, y) = proj.forward(0.7, -0.4).unwrap();
        let (lon, lat) = proj.inverse(x, y).unwrap();
        assert_relative_eq!(lon, 0.7, epsilon = 1e-12);
        assert_relative_eq!(lat, -0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_lat_ts_rejected() {
        assert!(Equirectangular::new(WGS84, Origin::default(), FRAC_PI_2).is_err());
        assert!(Equirectangular::new(WGS84, Origin::default(), -FRAC_PI_2).is_err());
        assert!(Equirectangular::new(WGS84, Origin::default(), 90.0_f64.to_radians()).is_err());
        assert!(Equirectangular::new(WGS84, Origin::default(), f64::NAN).is_err());
        assert!(Equirectangular::new(WGS84, Origin::default(), 89.0_f64.to_radians()).is_ok());
    }
}
