//! Mercator projection (ellipsoidal, with standard parallel or scale factor).
//!
//!   forward: x = a·k₀·(λ - λ₀), y = -a·k₀·ln(tsfn(φ, e))
//!   inverse: λ = λ₀ + x/(a·k₀), φ = phi_from_ts(exp(-y/(a·k₀)), e)

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::{adjlon, msfn, phi_from_ts, tsfn};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Origin, Projection};

/// Latitudes this close to a pole have no finite northing.
const POLE_EPS: f64 = 1e-10;

/// Ellipsoidal Mercator scaled by `k0` on the equator.
#[derive(Debug, Clone)]
pub struct Mercator {
    ellipsoid: Ellipsoid,
    origin: Origin,
    k0: f64,
}

impl Mercator {
    /// Scale factor taken from the standard parallel `lat_ts` (radians).
    pub fn with_lat_ts(ellipsoid: Ellipsoid, origin: Origin, lat_ts: f64) -> Self {
        let k0 = msfn(lat_ts, ellipsoid.e2);
        Self { ellipsoid, origin, k0 }
    }

    /// Explicit scale factor on the equator.
    pub fn with_scale(ellipsoid: Ellipsoid, origin: Origin, k0: f64) -> Self {
        Self { ellipsoid, origin, k0 }
    }
}

impl Projection for Mercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || (lat.abs() - FRAC_PI_2).abs() <= POLE_EPS || lat.abs() > FRAC_PI_2 {
            return Err(ProjError::OutsideDomain);
        }
        let ak0 = self.ellipsoid.a * self.k0;
        let e = self.ellipsoid.eccentricity();
        let lam = adjlon(lon - self.origin.lon0);
        Ok((
            ak0 * lam + self.origin.false_easting,
            -ak0 * tsfn(lat, e).ln() + self.origin.false_northing,
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let ak0 = self.ellipsoid.a * self.k0;
        let e = self.ellipsoid.eccentricity();
        let ts = (-(y - self.origin.false_northing) / ak0).exp();
        let lat = phi_from_ts(ts, e)?;
        let lon = (x - self.origin.false_easting) / ak0;
        if !lon.is_finite() {
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
    use std::f64::consts::PI;

    #[test]
    fn test_equator_reference() {
        // (180°, 0°) on WGS84 with k0 = 1
        let proj = Mercator::with_lat_ts(WGS84, Origin::default(), 0.0);
        let (x, y) = proj.forward(PI, 0.0).unwrap();
        assert_relative_eq!(x, 20_037_508.342_789_244, epsilon = 0.01);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let proj = Mercator::with_lat_ts(WGS84, Origin::default(), 0.0);
        for &(lon_deg, lat_deg) in &[(10.0_f64, 45.0_f64), (-73.9857, 40.7484), (139.6917, -35.6895)] {
            let (x, y) = proj.forward(lon_deg.to_radians(), lat_deg.to_radians()).unwrap();
            let (lon, lat) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon.to_degrees(), lon_deg, epsilon = 1e-9);
            assert_relative_eq!(lat.to_degrees(), lat_deg, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pole_is_outside_domain() {
        let proj = Mercator::with_scale(WGS84, Origin::default(), 1.0);
        assert_eq!(proj.forward(0.0, FRAC_PI_2), Err(ProjError::OutsideDomain));
        assert!(proj.forward(0.0, 89.0_f64.to_radians()).is_ok());
    }

    #[test]
    fn test_lat_ts_reduces_scale() {
        let plain = Mercator::with_lat_ts(WGS84, Origin::default(), 0.0);
        let scaled = Mercator::with_lat_ts(WGS84, Origin::default(), 45.0_f64.to_radians());
        let (x0, _) = plain.forward(1.0, 0.0).unwrap();
        let (x1, _) = scaled.forward(1.0, 0.0).unwrap();
        assert!(x1 < x0);
    }
}
