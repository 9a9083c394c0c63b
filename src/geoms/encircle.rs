//! Smooth outlines drawn around groups of points.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::grammar::{finite_points, Aes, Coord, DataFrame, Geom, Grob, PanelParams, Style};
use crate::smooth::{centroid, convex_hull, XSpline};

/// Closed X-spline around each group's convex hull, in panel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeomEncircle {
    expand: f64,
    spread: f64,
    spline: XSpline,
}

impl Default for GeomEncircle {
    fn default() -> Self {
        Self { expand: 0.05, spread: 0.001, spline: closed_spline(0.5) }
    }
}

fn closed_spline(shape: f64) -> XSpline {
    XSpline::new(shape).unwrap_or_default().open(false)
}

impl GeomEncircle {
    /// Default outline: 0.05 npc clearance, shape 0.5.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance (npc) each hull vertex is pushed out along each axis.
    #[must_use]
    pub fn expand(mut self, expand: f64) -> Self {
        self.expand = expand;
        self
    }

    /// Replace each point by four copies this far (npc) above, below, left
    /// and right of it; zero disables.
    #[must_use]
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = spread.max(0.0);
        self
    }

    /// X-spline shape of the outline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `shape` is outside `[-1, 1]`.
    pub fn s_shape(mut self, shape: f64) -> Result<Self> {
        if !(-1.0..=1.0).contains(&shape) {
            return Err(Error::InvalidParameter(format!("s_shape must lie in [-1, 1], got {shape}")));
        }
        self.spline = closed_spline(shape);
        Ok(self)
    }

    /// Outline vertices (panel space) for one group.
    fn outline(&self, points: &[Point]) -> Vec<Point> {
        let spread: Vec<Point> = if self.spread > 0.0 {
            let d = self.spread;
            points
                .iter()
                .flat_map(|p| {
                    [
                        Point::new(p.x + d, p.y),
                        Point::new(p.x - d, p.y),
                        Point::new(p.x, p.y + d),
                        Point::new(p.x, p.y - d),
                    ]
                })
                .collect()
        } else {
            points.to_vec()
        };

        let hull = convex_hull(&spread);
        let Some(c) = centroid(&hull) else {
            return Vec::new();
        };
        let pushed: Vec<Point> = hull
            .iter()
            .map(|v| {
                Point::new(v.x + self.expand * sign(v.x - c.x), v.y + self.expand * sign(v.y - c.y))
            })
            .collect();
        self.spline.points(&pushed)
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Geom for GeomEncircle {
    fn name(&self) -> &'static str {
        "encircle"
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let style = Style { colour: Rgba::BLACK, fill: None, ..Style::default() }.resolve(aes);
        let mut children = Vec::new();
        for group in coord.transform(data, panel)?.split_by("group") {
            let points = finite_points(&group);
            if points.is_empty() {
                continue;
            }
            let outline = self.outline(&points);
            if outline.len() >= 3 {
                children.push(Grob::Polygon { points: outline, gp: style.fill_gpar() });
            }
        }
        if children.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::tree("encircle", children))
    }
}
