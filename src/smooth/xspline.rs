//! X-splines.
//!
//! A shape parameter per control point moves the curve between a B-spline
//! like approximation (`s > 0`), interpolation (`s = 0`) and interpolation
//! with overshoot (`s < 0`).
//!
//! ## References
//! - Blanc, C. & Schlick, C. (1995). "X-Splines: A Spline Model Designed for
//!   the End-User." SIGGRAPH '95.

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Interpolating with mild overshoot.
pub const DEFAULT_SHAPE: f64 = -0.25;
/// Samples per segment.
pub const DEFAULT_STEPS: usize = 20;

/// X-spline settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XSpline {
    shape: f64,
    open: bool,
    rep_ends: bool,
    steps: usize,
}

impl Default for XSpline {
    fn default() -> Self {
        Self { shape: DEFAULT_SHAPE, open: true, rep_ends: true, steps: DEFAULT_STEPS }
    }
}

impl XSpline {
    /// Spline with `shape` at every interior control point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `shape` is outside `[-1, 1]`.
    pub fn new(shape: f64) -> Result<Self> {
        if !(-1.0..=1.0).contains(&shape) {
            return Err(Error::InvalidParameter(format!("xspline shape must lie in [-1, 1], got {shape}")));
        }
        Ok(Self { shape, ..Self::default() })
    }

    /// Open curve (default) or closed loop.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Repeat the end points so an open curve reaches them.
    #[must_use]
    pub fn rep_ends(mut self, rep_ends: bool) -> Self {
        self.rep_ends = rep_ends;
        self
    }

    /// Samples per segment, at least one.
    #[must_use]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps.max(1);
        self
    }

    /// The shape parameter.
    #[must_use]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Whether the curve is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sample the curve through `control`.
    ///
    /// Open curves end on the last control point; closed curves return one
    /// lap without repeating the first sample.
    #[must_use]
    pub fn points(&self, control: &[Point]) -> Vec<Point> {
        if control.len() < 2 {
            return control.to_vec();
        }
        if self.open { self.open_curve(control) } else { self.closed_curve(control) }
    }

    fn open_curve(&self, control: &[Point]) -> Vec<Point> {
        let mut pts = Vec::with_capacity(control.len() + 2);
        let mut shapes = Vec::with_capacity(control.len() + 2);
        if self.rep_ends {
            pts.push(control[0]);
            shapes.push(0.0);
        }
        for (i, p) in control.iter().enumerate() {
            pts.push(*p);
            shapes.push(if i == 0 || i == control.len() - 1 { 0.0 } else { self.shape });
        }
        if self.rep_ends {
            pts.push(control[control.len() - 1]);
            shapes.push(0.0);
        }
        if pts.len() < 4 {
            return control.to_vec();
        }

        let mut out = Vec::with_capacity((pts.len() - 3) * self.steps + 1);
        for k in 0..pts.len() - 3 {
            self.segment(&pts[k..k + 4], shapes[k + 1], shapes[k + 2], &mut out);
        }
        out.push(pts[pts.len() - 2]);
        out
    }

    fn closed_curve(&self, control: &[Point]) -> Vec<Point> {
        let n = control.len();
        let mut out = Vec::with_capacity(n * self.steps);
        for k in 0..n {
            let quad = [control[(k + n - 1) % n], control[k], control[(k + 1) % n], control[(k + 2) % n]];
            self.segment(&quad, self.shape, self.shape, &mut out);
        }
        out
    }

    /// Samples of the segment from `p[1]` towards `p[2]`, excluding `p[2]`.
    fn segment(&self, p: &[Point], s1: f64, s2: f64, out: &mut Vec<Point>) {
        for j in 0..self.steps {
            let t = j as f64 / self.steps as f64;
            let (a0, a2) = if s1 < 0.0 {
                (h_blend(-t, -s1), g_blend(t, -s1))
            } else {
                (if t < s1 { f_blend(t - s1, -1.0 - s1) } else { 0.0 }, f_blend(t + s1, 1.0 + s1))
            };
            let (a1, a3) = if s2 < 0.0 {
                (g_blend(1.0 - t, -s2), h_blend(t - 1.0, -s2))
            } else {
                (f_blend(t - 1.0 - s2, -1.0 - s2), if t > 1.0 - s2 { f_blend(t - 1.0 + s2, 1.0 + s2) } else { 0.0 })
            };
            let sum = a0 + a1 + a2 + a3;
            if sum.abs() < f64::EPSILON {
                out.push(p[1]);
                continue;
            }
            out.push(Point::new(
                (a0 * p[0].x + a1 * p[1].x + a2 * p[2].x + a3 * p[3].x) / sum,
                (a0 * p[0].y + a1 * p[1].y + a2 * p[2].y + a3 * p[3].y) / sum,
            ));
        }
    }
}

/// Quintic blend for approximating shapes.
fn f_blend(numerator: f64, denominator: f64) -> f64 {
    let p = 2.0 * denominator * denominator;
    let u = numerator / denominator;
    let u2 = u * u;
    u * u2 * (10.0 - p + (2.0 * p - 15.0) * u + (6.0 - p) * u2)
}

/// Blend towards the near control point for interpolating shapes (p = 2).
fn g_blend(u: f64, q: f64) -> f64 {
    u * (q + u * (2.0 * q + u * (8.0 - 12.0 * q + u * (14.0 * q - 11.0 + u * (4.0 - 5.0 * q)))))
}

/// Blend towards the far control point for interpolating shapes.
fn h_blend(u: f64, q: f64) -> f64 {
    let u2 = u * u;
    u * (q + u * (2.0 * q + u2 * (-2.0 * q - u * q)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 0.0), Point::new(3.0, 2.0)]
    }

    #[test]
    fn test_blends_reach_one() {
        assert_relative_eq!(f_blend(1.0, 1.0), 1.0);
        assert_relative_eq!(g_blend(1.0, 0.3), 1.0, epsilon = 1e-12);
        assert_relative_eq!(h_blend(-1.0, 0.3), 0.0, epsilon = 1e-12);
        assert_eq!(g_blend(0.0, 0.3), 0.0);
    }

    #[test]
    fn test_shape_out_of_range() {
        assert!(XSpline::new(1.5).is_err());
        assert!(XSpline::new(-1.01).is_err());
        assert!(XSpline::new(-1.0).is_ok());
    }

    #[test]
    fn test_open_passes_through_ends() {
        let pts = XSpline::default().points(&zigzag());
        assert_eq!(pts.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&Point::new(3.0, 2.0)));
        assert_eq!(pts.len(), 3 * DEFAULT_STEPS + 1);
    }

    #[test]
    fn test_interpolating_hits_control_points() {
        let control = zigzag();
        for shape in [0.0, -0.5, -1.0] {
            let pts = XSpline::new(shape).unwrap().steps(10).points(&control);
            // every segment starts on its control point
            for (i, c) in control.iter().enumerate().take(control.len() - 1) {
                assert_relative_eq!(pts[i * 10].x, c.x, epsilon = 1e-9);
                assert_relative_eq!(pts[i * 10].y, c.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_approximating_stays_inside_hull() {
        let pts = XSpline::new(1.0).unwrap().points(&zigzag());
        assert!(pts.iter().all(|p| p.y >= -1e-9 && p.y <= 2.0 + 1e-9));
        assert!(pts[DEFAULT_STEPS].y < 2.0);
    }

    #[test]
    fn test_closed_loop_sample_count() {
        let square = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)];
        let pts = XSpline::new(0.5).unwrap().open(false).steps(8).points(&square);
        assert_eq!(pts.len(), 32);
        let cx = pts.iter().map(|p| p.x).sum::<f64>() / pts.len() as f64;
        assert_relative_eq!(cx, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_without_rep_ends_skips_outer_segments() {
        let pts = XSpline::new(0.0).unwrap().rep_ends(false).steps(5).points(&zigzag());
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(1.0, 2.0));
        assert_eq!(pts[5], Point::new(2.0, 0.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(XSpline::default().points(&[]).is_empty());
        assert_eq!(XSpline::default().points(&[Point::new(1.0, 1.0)]).len(), 1);
        let line = XSpline::default().points(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(line.iter().all(|p| (p.x - p.y).abs() < 1e-12));
    }
}
