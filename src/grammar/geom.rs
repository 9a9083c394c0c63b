//! Geometries: how a layer's rows become drawable grobs.
//!
//! Geoms receive data in data space and ask the coord to map it into panel
//! space before drawing.

use std::fmt::Debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;

use super::aes::Aes;
use super::coord::{munch, Coord, PanelParams};
use super::data::DataFrame;
use super::grob::{Gpar, Grob};

/// Device units per millimetre, for sizes given in mm.
pub const PT: f64 = 72.27 / 25.4;

/// Resolved fixed visual values of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Stroke / point colour.
    pub colour: Rgba,
    /// Fill colour.
    pub fill: Option<Rgba>,
    /// Point size (mm).
    pub size: f64,
    /// Line width (mm).
    pub linewidth: f64,
    /// Opacity.
    pub alpha: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { colour: Rgba::BLACK, fill: None, size: 1.5, linewidth: 0.5, alpha: 1.0 }
    }
}

impl Style {
    /// Fixed values from `aes` over these defaults.
    #[must_use]
    pub fn resolve(self, aes: &Aes) -> Self {
        Self {
            colour: aes.color_value.unwrap_or(self.colour),
            fill: aes.fill_value.or(self.fill),
            size: aes.size_value.unwrap_or(self.size),
            linewidth: aes.linewidth_value.unwrap_or(self.linewidth),
            alpha: aes.alpha_value.unwrap_or(self.alpha),
        }
    }

    /// Stroke parameters.
    #[must_use]
    pub fn line_gpar(&self) -> Gpar {
        Gpar::stroke(self.colour.fade(self.alpha), self.linewidth * PT)
    }

    /// Filled-shape parameters; the outline uses the stroke colour.
    #[must_use]
    pub fn fill_gpar(&self) -> Gpar {
        Gpar {
            colour: Some(self.colour),
            fill: self.fill.map(|f| f.fade(self.alpha)),
            linewidth: self.linewidth * PT,
        }
    }

    /// Point parameters.
    #[must_use]
    pub fn point_gpar(&self) -> Gpar {
        Gpar { colour: None, fill: Some(self.colour.fade(self.alpha)), linewidth: 0.0 }
    }
}

/// Geometry contract.
pub trait Geom: Debug + Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Columns the geom needs after its stat ran.
    fn required(&self) -> &'static [&'static str] {
        &["x", "y"]
    }

    /// Adjust data before scale training (e.g. add segment ends).
    ///
    /// # Errors
    ///
    /// Returns an error if derived columns cannot be added.
    fn setup_data(&self, data: DataFrame) -> Result<DataFrame> {
        Ok(data)
    }

    /// Draw one panel.
    ///
    /// # Errors
    ///
    /// Propagates coord transform failures.
    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob>;
}

/// Finite `(x, y)` points of a panel-space frame, in row order.
#[must_use]
pub fn finite_points(data: &DataFrame) -> Vec<Point> {
    match (data.number("x"), data.number("y")) {
        (Some(xs), Some(ys)) => {
            xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).filter(|p| p.is_finite()).collect()
        }
        _ => Vec::new(),
    }
}

/// Split a point sequence at non-finite points, keeping runs of 2 or more.
#[must_use]
pub fn finite_runs(xs: &[f64], ys: &[f64]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        let p = Point::new(x, y);
        if p.is_finite() {
            current.push(p);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    runs.push(current);
    runs.retain(|r| r.len() >= 2);
    runs
}

/// Points.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomPoint;

impl Geom for GeomPoint {
    fn name(&self) -> &'static str {
        "point"
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let style = Style::default().resolve(aes);
        let points = finite_points(&coord.transform(data, panel)?);
        if points.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::Points { points, size: style.size * PT, gp: style.point_gpar() })
    }
}

/// Connects rows in order, one line per group. Non-linear coords draw the
/// connections curved.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomPath;

impl Geom for GeomPath {
    fn name(&self) -> &'static str {
        "path"
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let style = Style::default().resolve(aes);
        let mut lines = Vec::new();
        for group in data.split_by("group") {
            let group = munch(coord, &group, panel)?;
            let (Some(xs), Some(ys)) = (group.number("x"), group.number("y")) else {
                continue;
            };
            lines.extend(finite_runs(xs, ys));
        }
        if lines.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::Polyline { lines, gp: style.line_gpar() })
    }
}

/// Segments from `(x, y)` to `(xend, yend)`: straight under linear coords,
/// munched polylines otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomSegment;

impl Geom for GeomSegment {
    fn name(&self) -> &'static str {
        "segment"
    }

    fn required(&self) -> &'static [&'static str] {
        &["x", "y", "xend", "yend"]
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let style = Style::default().resolve(aes);
        if !coord.is_linear() {
            return Self::draw_munched(data, panel, coord, style);
        }
        let starts = coord.transform(data, panel)?;
        let ends = DataFrame::from_xy(data.require_number("xend")?, data.require_number("yend")?);
        let ends = coord.transform(&ends, panel)?;

        let segments: Vec<(Point, Point)> = finite_points_aligned(&starts)
            .into_iter()
            .zip(finite_points_aligned(&ends))
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .collect();
        if segments.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::Segments { segments, gp: style.line_gpar() })
    }
}

impl GeomSegment {
    fn draw_munched(data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, style: Style) -> Result<Grob> {
        let (xs, ys) = (data.require_number("x")?, data.require_number("y")?);
        let (xend, yend) = (data.require_number("xend")?, data.require_number("yend")?);
        let mut lines = Vec::new();
        for row in 0..data.nrow() {
            let path = DataFrame::from_xy(&[xs[row], xend[row]], &[ys[row], yend[row]]);
            let path = munch(coord, &path, panel)?;
            if let (Some(px), Some(py)) = (path.number("x"), path.number("y")) {
                lines.extend(finite_runs(px, py));
            }
        }
        if lines.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::Polyline { lines, gp: style.line_gpar() })
    }
}

/// Every `(x, y)` row, finite or not.
fn finite_points_aligned(data: &DataFrame) -> Vec<Point> {
    match (data.number("x"), data.number("y")) {
        (Some(xs), Some(ys)) => xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect(),
        _ => Vec::new(),
    }
}

/// Filled area between `y = 0` and the curve, one polygon per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomArea;

impl GeomArea {
    /// Polygon vertices (data space): the curve left to right, then the
    /// baseline back.
    fn outline(group: &DataFrame) -> DataFrame {
        let (Some(xs), Some(ys)) = (group.number("x"), group.number("y")) else {
            return DataFrame::new();
        };
        let mut pts: Vec<(f64, f64)> =
            xs.iter().zip(ys).map(|(&x, &y)| (x, y)).filter(|(x, y)| x.is_finite() && y.is_finite()).collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0));
        let px: Vec<f64> = pts.iter().map(|p| p.0).chain(pts.iter().rev().map(|p| p.0)).collect();
        let py: Vec<f64> = pts.iter().map(|p| p.1).chain(pts.iter().map(|_| 0.0)).collect();
        DataFrame::from_xy(&px, &py)
    }

    /// Panel-space polygon of an outline, with the closing edge munched too.
    fn polygon(outline: &DataFrame, panel: &PanelParams, coord: &dyn Coord) -> Result<Vec<Point>> {
        let n = outline.nrow();
        let closed: Vec<usize> = (0..n).chain([0]).collect();
        let ring = munch(coord, &outline.take(&closed), panel)?;
        let open: Vec<usize> = (0..ring.nrow().saturating_sub(1)).collect();
        Ok(finite_points(&ring.take(&open)))
    }
}

impl Geom for GeomArea {
    fn name(&self) -> &'static str {
        "area"
    }

    fn setup_data(&self, data: DataFrame) -> Result<DataFrame> {
        let n = data.nrow();
        data.with_number("ymin", vec![0.0; n])
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let style = Style { fill: Some(Rgba::GREY20), ..Style::default() }.resolve(aes);
        let mut children = Vec::new();
        for group in data.split_by("group") {
            let outline = Self::outline(&group);
            if outline.nrow() < 4 {
                continue;
            }
            let points = Self::polygon(&outline, panel, coord)?;
            if points.len() >= 3 {
                children.push(Grob::Polygon { points, gp: style.fill_gpar() });
            }
        }
        if children.is_empty() {
            return Ok(Grob::Null);
        }
        Ok(Grob::tree("area", children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::coord::CoordCartesian;
    use crate::grammar::scale::ContinuousScale;

    fn panel_for(coord: &CoordCartesian) -> PanelParams {
        let mut x = ContinuousScale::x();
        let mut y = ContinuousScale::y();
        x.train_values(&[0.0, 10.0]);
        y.train_values(&[0.0, 10.0]);
        coord.train(&x, &y).unwrap()
    }

    #[test]
    fn test_finite_runs_split_at_nan() {
        let runs = finite_runs(&[0.0, 1.0, f64::NAN, 2.0, 3.0, 4.0, f64::NAN, 5.0], &[0.0; 8]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn test_point_drops_non_finite() {
        let coord = CoordCartesian::new();
        let panel = panel_for(&coord);
        let data = DataFrame::from_xy(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]);
        match GeomPoint.draw_panel(&data, &panel, &coord, &Aes::new()).unwrap() {
            Grob::Points { points, .. } => assert_eq!(points.len(), 2),
            other => panic!("expected points, got {other:?}"),
        }
    }

    #[test]
    fn test_path_one_line_per_group() {
        let coord = CoordCartesian::new();
        let panel = panel_for(&coord);
        let data = DataFrame::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0])
            .with_number("group", vec![1.0, 1.0, 2.0, 2.0])
            .unwrap();
        match GeomPath.draw_panel(&data, &panel, &coord, &Aes::new()).unwrap() {
            Grob::Polyline { lines, .. } => assert_eq!(lines.len(), 2),
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_segment_requires_ends() {
        let coord = CoordCartesian::new();
        let panel = panel_for(&coord);
        let data = DataFrame::from_xy(&[1.0], &[1.0]);
        assert!(GeomSegment.draw_panel(&data, &panel, &coord, &Aes::new()).is_err());
    }

    #[test]
    fn test_area_outline_closes_on_baseline() {
        let group = DataFrame::from_xy(&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0]);
        let outline = GeomArea::outline(&group);
        assert_eq!(outline.number("x").unwrap(), &[0.0, 1.0, 2.0, 2.0, 1.0, 0.0]);
        assert_eq!(outline.number("y").unwrap(), &[3.0, 2.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cartesian_segment_stays_straight() {
        let coord = CoordCartesian::new();
        let panel = panel_for(&coord);
        let data = DataFrame::from_xy(&[1.0, 2.0], &[1.0, 2.0])
            .with_number("xend", vec![5.0, 6.0])
            .unwrap()
            .with_number("yend", vec![1.0, 9.0])
            .unwrap();
        match GeomSegment.draw_panel(&data, &panel, &coord, &Aes::new()).unwrap() {
            Grob::Segments { segments, .. } => assert_eq!(segments.len(), 2),
            other => panic!("expected segments, got {other:?}"),
        }
    }

    #[test]
    fn test_cartesian_path_and_area_keep_vertices() {
        let coord = CoordCartesian::new();
        let panel = panel_for(&coord);
        let data = DataFrame::from_xy(&[0.0, 10.0], &[0.0, 10.0]);
        match GeomPath.draw_panel(&data, &panel, &coord, &Aes::new()).unwrap() {
            Grob::Polyline { lines, .. } => assert_eq!(lines[0].len(), 2),
            other => panic!("expected polyline, got {other:?}"),
        }
        let curve = DataFrame::from_xy(&[0.0, 5.0, 10.0], &[1.0, 3.0, 2.0]);
        let area = GeomArea.draw_panel(&curve, &panel, &coord, &Aes::new()).unwrap();
        let leaves = area.leaves();
        assert_eq!(leaves.len(), 1);
        match leaves[0] {
            Grob::Polygon { points, .. } => assert_eq!(points.len(), 6),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_style_resolve() {
        let style = Style::default().resolve(&Aes::new().size_value(4.0).alpha_value(0.5));
        assert_eq!(style.size, 4.0);
        assert_eq!(style.point_gpar().fill.map(|c| c.a), Some(128));
    }
}
