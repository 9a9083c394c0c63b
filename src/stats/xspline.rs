//! X-spline smoothing of each group's path.

use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::{carry_group_columns, DataFrame, Stat};
use crate::smooth::XSpline;

/// Replaces each group's points by samples of an X-spline through them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatXspline {
    spline: XSpline,
}

impl StatXspline {
    /// Default spline: shape -0.25, open, end points repeated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `spline` for every group.
    #[must_use]
    pub fn with_spline(spline: XSpline) -> Self {
        Self { spline }
    }

    /// The spline settings.
    #[must_use]
    pub fn spline(&self) -> &XSpline {
        &self.spline
    }
}

impl Stat for StatXspline {
    fn name(&self) -> &'static str {
        "xspline"
    }

    fn compute_group(&self, data: &DataFrame) -> Result<DataFrame> {
        let xs = data.require_number("x")?;
        let ys = data.require_number("y")?;
        let control: Vec<Point> = xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).filter(|p| p.is_finite()).collect();
        let curve = self.spline.points(&control);
        let cx: Vec<f64> = curve.iter().map(|p| p.x).collect();
        let cy: Vec<f64> = curve.iter().map(|p| p.y).collect();
        carry_group_columns(data, DataFrame::from_xy(&cx, &cy))
    }
}
