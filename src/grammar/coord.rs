//! Coordinate systems.
//!
//! A coordinate system owns the last step of the pipeline: it turns trained
//! position scales into panel parameters, maps data into panel space, and
//! draws the background grid and axis guides.

use crate::error::Result;
use crate::geometry::{Point, Range};

use super::data::{Column, DataFrame};
use super::grob::{Grob, Side};
use super::scale::{expand_range, rescale, Axis, ContinuousScale, Expansion};
use super::theme::Theme;

/// Trained parameters for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisParams {
    /// Data-space range (limits or expanded data range).
    pub range: Range,
    /// Range that maps onto `[0, 1]` in panel space.
    pub proj: Range,
    /// Major breaks in data units.
    pub major: Vec<f64>,
    /// Minor breaks in data units.
    pub minor: Vec<f64>,
    /// One label per major break.
    pub labels: Vec<String>,
}

/// Everything a coord needs to draw one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelParams {
    /// Horizontal axis.
    pub x: AxisParams,
    /// Vertical axis.
    pub y: AxisParams,
    /// `(latitude, longitude, rotation)` of the projection orientation, for
    /// coords that have one.
    pub orientation: Option<(f64, f64, f64)>,
}

/// Top and bottom axis guides.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalAxes {
    /// Above the panel.
    pub top: Grob,
    /// Below the panel.
    pub bottom: Grob,
}

/// Left and right axis guides.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalAxes {
    /// Left of the panel.
    pub left: Grob,
    /// Right of the panel.
    pub right: Grob,
}

/// Longest piece, as a fraction of the panel diagonal, that [`munch`]
/// leaves between consecutive points.
pub const MUNCH_SEGMENT_LENGTH: f64 = 0.01;

/// The coordinate-system contract.
pub trait Coord {
    /// Whether straight lines in data space stay straight in panel space.
    fn is_linear(&self) -> bool {
        true
    }

    /// Distance between consecutive points as a fraction of the panel's
    /// data-range diagonal. Has one element fewer than the input.
    fn distance(&self, xs: &[f64], ys: &[f64], panel: &PanelParams) -> Vec<f64> {
        euclidean_distance(xs, ys, panel)
    }

    /// Height to width ratio the panel must be drawn at, if fixed.
    fn aspect(&self, _panel: &PanelParams) -> Option<f64> {
        None
    }

    /// Compute panel parameters from the trained position scales.
    ///
    /// # Errors
    ///
    /// Returns an error when no drawable extent can be derived.
    fn train(&self, x: &ContinuousScale, y: &ContinuousScale) -> Result<PanelParams>;

    /// Map the position columns of `data` into panel space; every other
    /// column passes through unchanged and the row count is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` lacks the `x` or `y` column.
    fn transform(&self, data: &DataFrame, panel: &PanelParams) -> Result<DataFrame>;

    /// Panel background and grid lines.
    ///
    /// # Errors
    ///
    /// Propagates transform failures.
    fn render_bg(&self, panel: &PanelParams, theme: &Theme) -> Result<Grob>;

    /// Horizontal axis guides.
    ///
    /// # Errors
    ///
    /// Propagates transform failures.
    fn render_axis_h(&self, panel: &PanelParams, theme: &Theme) -> Result<HorizontalAxes>;

    /// Vertical axis guides.
    ///
    /// # Errors
    ///
    /// Propagates transform failures.
    fn render_axis_v(&self, panel: &PanelParams, theme: &Theme) -> Result<VerticalAxes>;
}

/// Straight-line distance between consecutive points, divided by the
/// diagonal of the panel's data range.
#[must_use]
pub fn euclidean_distance(xs: &[f64], ys: &[f64], panel: &PanelParams) -> Vec<f64> {
    let diagonal = panel.x.range.span().hypot(panel.y.range.span());
    xs.windows(2).zip(ys.windows(2)).map(|(x, y)| (x[1] - x[0]).hypot(y[1] - y[0]) / diagonal).collect()
}

/// Transform `data` as a connected path.
///
/// Linear coords transform directly. Otherwise each consecutive pair is first
/// cut into pieces of at most [`MUNCH_SEGMENT_LENGTH`] by linear interpolation
/// of `x` and `y`; interpolated rows repeat the other columns of the row they
/// start from.
///
/// # Errors
///
/// Returns an error if `data` lacks the `x` or `y` column.
pub fn munch(coord: &dyn Coord, data: &DataFrame, panel: &PanelParams) -> Result<DataFrame> {
    if coord.is_linear() || data.nrow() < 2 {
        return coord.transform(data, panel);
    }
    let xs = data.require_number("x")?;
    let ys = data.require_number("y")?;

    let mut rows = Vec::with_capacity(xs.len());
    let mut mx = Vec::with_capacity(xs.len());
    let mut my = Vec::with_capacity(xs.len());
    for (i, d) in coord.distance(xs, ys, panel).into_iter().enumerate() {
        let pieces = if d.is_finite() { ((d / MUNCH_SEGMENT_LENGTH).floor() as usize).max(1) } else { 1 };
        rows.push(i);
        mx.push(xs[i]);
        my.push(ys[i]);
        for k in 1..pieces {
            let t = k as f64 / pieces as f64;
            rows.push(i);
            mx.push(xs[i] + (xs[i + 1] - xs[i]) * t);
            my.push(ys[i] + (ys[i + 1] - ys[i]) * t);
        }
    }
    let last = xs.len() - 1;
    rows.push(last);
    mx.push(xs[last]);
    my.push(ys[last]);

    let mut out = data.take(&rows);
    out.insert("x", Column::Number(mx))?;
    out.insert("y", Column::Number(my))?;
    coord.transform(&out, panel)
}

/// Axis guide for ticks at `at` (npc). Ticks that are not finite are
/// dropped together with their label; no ticks gives [`Grob::Null`].
#[must_use]
pub fn axis_guide(side: Side, at: &[f64], labels: &[String], theme: &Theme) -> Grob {
    if !theme.show_axis {
        return Grob::Null;
    }
    let (at, labels): (Vec<f64>, Vec<String>) = at
        .iter()
        .zip(labels)
        .filter(|(v, _)| v.is_finite())
        .map(|(v, l)| (*v, l.clone()))
        .unzip();
    if at.is_empty() {
        return Grob::Null;
    }
    Grob::Axis { side, at, labels, gp: theme.axis_gpar() }
}

/// Apply `f` to every position column of `axis`, leaving the rest alone.
pub(crate) fn map_position_columns(
    data: &DataFrame,
    axis: Axis,
    f: impl Fn(f64) -> f64,
) -> Result<DataFrame> {
    let mut out = data.clone();
    for column in axis.columns() {
        if let Some(values) = data.number(column) {
            out.insert(column, Column::Number(values.iter().map(|&v| f(v)).collect()))?;
        }
    }
    Ok(out)
}

/// The default linear coordinate system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordCartesian {
    xlim: Option<Range>,
    ylim: Option<Range>,
}

impl CoordCartesian {
    /// Cartesian coordinates without limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom the x axis to `[min, max]` (before expansion).
    #[must_use]
    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some(Range::new(min, max));
        self
    }

    /// Zoom the y axis to `[min, max]` (before expansion).
    #[must_use]
    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some(Range::new(min, max));
        self
    }

    fn axis_params(scale: &ContinuousScale, lim: Option<Range>) -> AxisParams {
        let e = Expansion::default();
        let range = lim
            .map(|l| expand_range(l, e.mult, e.add, 1.0))
            .or_else(|| scale.dimension())
            .unwrap_or(Range::new(0.0, 1.0));
        let info = scale.break_info(range);
        AxisParams { range, proj: range, major: info.major, minor: info.minor, labels: info.labels }
    }
}

impl Coord for CoordCartesian {
    fn train(&self, x: &ContinuousScale, y: &ContinuousScale) -> Result<PanelParams> {
        Ok(PanelParams {
            x: Self::axis_params(x, self.xlim),
            y: Self::axis_params(y, self.ylim),
            orientation: None,
        })
    }

    fn transform(&self, data: &DataFrame, panel: &PanelParams) -> Result<DataFrame> {
        data.require_number("x")?;
        data.require_number("y")?;
        let out = map_position_columns(data, Axis::X, |v| rescale(v, panel.x.proj))?;
        map_position_columns(&out, Axis::Y, |v| rescale(v, panel.y.proj))
    }

    fn render_bg(&self, panel: &PanelParams, theme: &Theme) -> Result<Grob> {
        let verticals = |breaks: &[f64]| -> Vec<Vec<Point>> {
            breaks
                .iter()
                .map(|&b| rescale(b, panel.x.proj))
                .map(|x| vec![Point::new(x, 0.0), Point::new(x, 1.0)])
                .collect()
        };
        let horizontals = |breaks: &[f64]| -> Vec<Vec<Point>> {
            breaks
                .iter()
                .map(|&b| rescale(b, panel.y.proj))
                .map(|y| vec![Point::new(0.0, y), Point::new(1.0, y)])
                .collect()
        };
        Ok(Grob::tree(
            "grill",
            vec![
                theme.panel_background_grob(),
                Grob::tree("y.minor", vec![theme.grid_minor_lines(horizontals(&panel.y.minor))]),
                Grob::tree("x.minor", vec![theme.grid_minor_lines(verticals(&panel.x.minor))]),
                Grob::tree("y.major", vec![theme.grid_major_lines(horizontals(&panel.y.major))]),
                Grob::tree("x.major", vec![theme.grid_major_lines(verticals(&panel.x.major))]),
            ],
        ))
    }

    fn render_axis_h(&self, panel: &PanelParams, theme: &Theme) -> Result<HorizontalAxes> {
        let at: Vec<f64> = panel.x.major.iter().map(|&b| rescale(b, panel.x.proj)).collect();
        Ok(HorizontalAxes { top: Grob::Null, bottom: axis_guide(Side::Bottom, &at, &panel.x.labels, theme) })
    }

    fn render_axis_v(&self, panel: &PanelParams, theme: &Theme) -> Result<VerticalAxes> {
        let at: Vec<f64> = panel.y.major.iter().map(|&b| rescale(b, panel.y.proj)).collect();
        Ok(VerticalAxes { left: axis_guide(Side::Left, &at, &panel.y.labels, theme), right: Grob::Null })
    }
}
