//! Mollweide (homolographic) equal-area projection, spherical form.
//!
//! The auxiliary angle θ solves 2θ + sin 2θ = π sin φ by Newton iteration.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Origin, Projection};

const C_X: f64 = 2.0 * SQRT_2 / PI;
const C_Y: f64 = SQRT_2;
const C_P: f64 = PI;
const MAX_ITER: usize = 30;
const TOL: f64 = 1e-7;
/// Latitudes this close to a pole take θ = ±π/2 without iterating.
const POLE_EPS: f64 = 1e-10;

/// Spherical Mollweide on the ellipsoid's semi-major axis.
#[derive(Debug, Clone)]
pub struct Mollweide {
    ellipsoid: Ellipsoid,
    origin: Origin,
}

impl Mollweide {
    /// Builds the projection around `origin`; only `a` of the ellipsoid is used.
    pub fn new(ellipsoid: Ellipsoid, origin: Origin) -> Self {
        Self { ellipsoid, origin }
    }
}

impl Projection for Mollweide {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(ProjError::OutsideDomain);
        }
        let lam = adjlon(lon - self.origin.lon0);

        let theta = if FRAC_PI_2 - lat.abs() < POLE_EPS { FRAC_PI_2.copysign(lat) } else { auxiliary_angle(lat) };

        let a = self.ellipsoid.a;
        Ok((
            a * C_X * lam * theta.cos() + self.origin.false_easting,
            a * C_Y * theta.sin() + self.origin.false_northing,
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let x = (x - self.origin.false_easting) / a;
        let y = (y - self.origin.false_northing) / a;
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::OutsideDomain);
        }

        let theta = aasin(y / C_Y)?;
        let cos_theta = theta.cos();
        let lam = if cos_theta.abs() < 1e-15 { 0.0 } else { x / (C_X * cos_theta) };
        if lam.abs() > PI + 1e-10 {
            return Err(ProjError::OutsideDomain);
        }
        let two_theta = 2.0 * theta;
        let lat = aasin((two_theta + two_theta.sin()) / C_P)?;
        Ok((adjlon(lam + self.origin.lon0), lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

/// Solves 2θ + sin 2θ = π sin φ for θ.
fn auxiliary_angle(lat: f64) -> f64 {
    let k = C_P * lat.sin();
    let mut phi = lat;
    for _ in 0..MAX_ITER {
        let v = (phi + phi.sin() - k) / (1.0 + phi.cos());
        phi -= v;
        if v.abs() < TOL {
            return phi * 0.5;
        }
    }
    // no convergence means we are at a pole
    FRAC_PI_2.copysign(lat)
}
