//! Smoothed paths through each group's points.

use crate::grammar::{GeomPath, Layer};
use crate::smooth::XSpline;
use crate::stats::StatXspline;

/// A path layer drawn through an X-spline of each group's points.
#[must_use]
pub fn geom_xspline(spline: XSpline) -> Layer {
    Layer::new(GeomPath).stat(StatXspline::with_spline(spline))
}
