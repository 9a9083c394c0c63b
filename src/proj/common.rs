//! Common helpers for projection math (longitude wrapping, isometric latitude).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::error::ProjError;

/// Wrap a longitude difference into `[-π, π]`.
pub fn adjlon(lon: f64) -> f64 {
    if lon.abs() <= PI + 1e-12 {
        return lon;
    }
    let wrapped = (lon + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI && lon > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// `asin` that tolerates arguments a hair outside `[-1, 1]`.
pub fn aasin(v: f64) -> Result<f64, ProjError> {
    if v.abs() >= 1.0 {
        if v.abs() > 1.0 + 1e-14 {
            return Err(ProjError::OutsideDomain);
        }
        return Ok(FRAC_PI_2.copysign(v));
    }
    Ok(v.asin())
}

/// Scale factor of a parallel: cos φ / sqrt(1 - e² sin² φ).
pub fn msfn(phi: f64, e2: f64) -> f64 {
    let s = phi.sin();
    phi.cos() / (1.0 - e2 * s * s).sqrt()
}

/// Conformal latitude helper `t(φ)`.
pub fn tsfn(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// Invert [`tsfn`] by fixed-point iteration.
pub fn phi_from_ts(ts: f64, e: f64) -> Result<f64, ProjError> {
    let half_e = e / 2.0;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..15 {
        let con = e * phi.sin();
        let next = FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(half_e)).atan();
        let dphi = next - phi;
        phi = next;
        if dphi.abs() < 1e-12 {
            return Ok(phi);
        }
    }
    Err(ProjError::TransformFailed("latitude iteration did not converge".into()))
}
