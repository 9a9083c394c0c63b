//! Batch projection through a [`Projector`].

use tracing::trace;

use crate::geometry::Bounds;
use crate::proj::Projector;

/// Largest longitude handed to a forward projection.
pub const LON_LIMIT: f64 = 179.999_999_999_99;
/// Largest latitude handed to a forward projection.
pub const LAT_LIMIT: f64 = 89.999_999_999_99;

/// Pull a longitude strictly inside `(-180, 180)`.
#[must_use]
pub fn clamp_lon(lon: f64) -> f64 {
    lon.clamp(-LON_LIMIT, LON_LIMIT)
}

/// Pull a latitude strictly inside `(-90, 90)`.
#[must_use]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-LAT_LIMIT, LAT_LIMIT)
}

/// Projected coordinates of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    /// Output x, one per input row; `NaN` where the point failed.
    pub x: Vec<f64>,
    /// Output y, one per input row; `NaN` where the point failed.
    pub y: Vec<f64>,
    /// Extent of the finite output, `None` when nothing projected.
    pub bounds: Option<Bounds>,
}

/// Project parallel coordinate slices.
///
/// Forward input is clamped with [`clamp_lon`] and [`clamp_lat`] first;
/// inverse input is passed through as is. Rows that cannot be projected come
/// back as `NaN` and the output keeps the input's length.
#[must_use]
pub fn project4(projector: &Projector, xs: &[f64], ys: &[f64], inverse: bool, degrees: bool) -> Projected {
    let n = xs.len().min(ys.len());
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);

    for (&px, &py) in xs.iter().zip(ys) {
        // NaN input stays NaN through clamp
        let (px, py) = if inverse { (px, py) } else { (clamp_lon(px), clamp_lat(py)) };
        let (ox, oy) = projector.project(px, py, inverse, degrees);
        x.push(ox);
        y.push(oy);
    }

    let failed = x.iter().zip(&y).filter(|(a, b)| !a.is_finite() || !b.is_finite()).count();
    if failed > 0 {
        trace!(failed, total = n, "points could not be projected");
    }

    let bounds = Bounds::of_points(&x, &y);
    Projected { x, y, bounds }
}
