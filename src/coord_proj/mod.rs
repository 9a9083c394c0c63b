//! Projected coordinates.
//!
//! [`CoordProj`] draws longitude/latitude data through an arbitrary PROJ
//! string. Training projects a regular grid spanning the data (or the user
//! limits) to find the projected extent; every later pass rescales projected
//! values from that extent onto the unit panel.
//!
//! # Example
//!
//! ```rust
//! use ggalt::coord_proj::{CoordProj, CoordProjConfig};
//! use ggalt::grammar::*;
//!
//! let coord = CoordProj::new(CoordProjConfig::new().proj("+proj=moll +ellps=WGS84")).unwrap();
//! let plot = Plot::new()
//!     .data_xy(&[-120.0, 0.0, 120.0], &[-45.0, 10.0, 60.0])
//!     .geom(GeomPoint)
//!     .coord(coord)
//!     .build()
//!     .unwrap();
//! assert!(plot.panel.orientation.is_some());
//! ```

mod config;
mod project;

pub use config::{CoordProjConfig, HorizontalPosition, VerticalPosition, DEFAULT_PROJ};
pub use project::{clamp_lat, clamp_lon, project4, Projected, LAT_LIMIT, LON_LIMIT};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Point, Range};
use crate::grammar::{
    axis_guide, euclidean_distance, expand_range, finite_runs, rescale, AxisParams, Column, ContinuousScale, Coord, DataFrame, Grob,
    HorizontalAxes, PanelParams, Side, Theme, VerticalAxes,
};
use crate::proj::Projector;

/// Points per side of the training grid.
pub const TRAINING_GRID: usize = 50;
/// Points per background grid line.
pub const GRID_LINE_POINTS: usize = 50;
/// Fraction each grid line extends past the data range on each side.
pub const GRID_EXPANSION: f64 = 0.2;

/// Coordinates projected through a PROJ string.
#[derive(Debug)]
pub struct CoordProj {
    config: CoordProjConfig,
    projector: Projector,
}

impl CoordProj {
    /// Resolve the projection in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Projection`] when the PROJ string is malformed or
    /// unsupported, and [`Error::InvalidParameter`] for non-finite limits.
    pub fn new(config: CoordProjConfig) -> Result<Self> {
        config.validate()?;
        let projector = Projector::new(&config.proj, config.ellps_default.as_deref())?;
        Ok(Self { config, projector })
    }

    /// Robinson with the default settings.
    ///
    /// # Errors
    ///
    /// Propagates projection resolution failures.
    pub fn robinson() -> Result<Self> {
        Self::new(CoordProjConfig::default())
    }

    /// The configuration this coord was built from.
    #[must_use]
    pub fn config(&self) -> &CoordProjConfig {
        &self.config
    }

    /// The resolved projection.
    #[must_use]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Project coordinates in this coord's direction and angular unit.
    #[must_use]
    pub fn project(&self, xs: &[f64], ys: &[f64]) -> Projected {
        project4(&self.projector, xs, ys, self.config.inverse, self.config.degrees)
    }

    fn axis_range(&self, scale: &ContinuousScale, lim: Option<(f64, f64)>) -> Result<Range> {
        lim.map(Range::from).or_else(|| scale.dimension()).ok_or(Error::EmptyData)
    }

    /// Project, then rescale from the trained extent onto `[0, 1]`.
    fn to_panel(&self, xs: &[f64], ys: &[f64], panel: &PanelParams) -> (Vec<f64>, Vec<f64>) {
        let projected = self.project(xs, ys);
        let x = projected.x.iter().map(|&v| rescale(v, panel.x.proj)).collect();
        let y = projected.y.iter().map(|&v| rescale(v, panel.y.proj)).collect();
        (x, y)
    }

    /// Panel-space grid lines: one per break, each `GRID_LINE_POINTS` long,
    /// split wherever the projection fails.
    fn grid_lines(&self, breaks: &[f64], along: Range, vertical: bool, panel: &PanelParams) -> Vec<Vec<Point>> {
        let steps = along.seq(GRID_LINE_POINTS);
        let mut lines = Vec::with_capacity(breaks.len());
        for &b in breaks {
            let fixed = vec![b; steps.len()];
            let (xs, ys) = if vertical { (&fixed, &steps) } else { (&steps, &fixed) };
            let (px, py) = self.to_panel(xs, ys, panel);
            lines.extend(finite_runs(&px, &py));
        }
        lines
    }

    fn guide_mark(&self, side: Side, panel: &PanelParams, theme: &Theme) -> Grob {
        let (xs, ys, labels) = match side {
            Side::Bottom | Side::Top => {
                let y = if side == Side::Top { panel.y.range.max } else { panel.y.range.min };
                (panel.x.major.clone(), vec![y; panel.x.major.len()], &panel.x.labels)
            }
            Side::Left | Side::Right => {
                let x = if side == Side::Right { panel.x.range.max } else { panel.x.range.min };
                (vec![x; panel.y.major.len()], panel.y.major.clone(), &panel.y.labels)
            }
        };
        if xs.is_empty() {
            return Grob::Null;
        }
        let (px, py) = self.to_panel(&xs, &ys, panel);
        let at = if side.is_horizontal() { px } else { py };
        axis_guide(side, &at, labels, theme)
    }
}

/// Expanded by `GRID_EXPANSION` on each side, then cut to `mid ± half_width`.
#[must_use]
pub fn grid_range(range: Range, half_width: f64) -> Range {
    let expanded = expand_range(range, GRID_EXPANSION, 0.0, 1.0);
    let mid = expanded.mid();
    Range::new(expanded.min.max(mid - half_width), expanded.max.min(mid + half_width))
}

/// Central angle between two lon/lat points (haversine).
fn central_angle(a: (f64, f64), b: (f64, f64), degrees: bool) -> f64 {
    let to_rad = |v: f64| if degrees { v.to_radians() } else { v };
    let (lon1, lat1) = (to_rad(a.0), to_rad(a.1));
    let (lon2, lat2) = (to_rad(b.0), to_rad(b.1));
    let h = ((lat2 - lat1) / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

impl Coord for CoordProj {
    fn is_linear(&self) -> bool {
        false
    }

    /// Great-circle distance as a fraction of the angle spanned by the
    /// diagonal of the data range. Inverse coords take data in projected
    /// units and measure straight lines.
    fn distance(&self, xs: &[f64], ys: &[f64], panel: &PanelParams) -> Vec<f64> {
        if self.config.inverse {
            return euclidean_distance(xs, ys, panel);
        }
        let diagonal = central_angle(
            (panel.x.range.min, panel.y.range.min),
            (panel.x.range.max, panel.y.range.max),
            self.config.degrees,
        );
        xs.windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| central_angle((x[0], y[0]), (x[1], y[1]), self.config.degrees) / diagonal)
            .collect()
    }

    /// Height to width ratio of the projected extent; `None` when nothing
    /// projected.
    fn aspect(&self, panel: &PanelParams) -> Option<f64> {
        let ratio = panel.y.proj.span() / panel.x.proj.span();
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }

    fn train(&self, x: &ContinuousScale, y: &ContinuousScale) -> Result<PanelParams> {
        let x_range = self.axis_range(x, self.config.xlim)?;
        let y_range = self.axis_range(y, self.config.ylim)?;

        let xs = x_range.seq(TRAINING_GRID);
        let ys = y_range.seq(TRAINING_GRID);
        let grid_x: Vec<f64> = ys.iter().flat_map(|_| xs.iter().copied()).collect();
        let grid_y: Vec<f64> = ys.iter().flat_map(|&v| std::iter::repeat(v).take(xs.len())).collect();
        let bounds = self.project(&grid_x, &grid_y).bounds.unwrap_or_else(|| {
            warn!(proj = %self.config.proj, "no point of the training grid projects");
            Bounds { x: Range::EMPTY, y: Range::EMPTY }
        });

        debug!(
            grid = TRAINING_GRID * TRAINING_GRID,
            x_range = ?x_range.as_tuple(),
            y_range = ?y_range.as_tuple(),
            x_proj = ?bounds.x.as_tuple(),
            y_proj = ?bounds.y.as_tuple(),
            "trained projected panel"
        );

        let x_info = x.break_info(x_range);
        let y_info = y.break_info(y_range);
        Ok(PanelParams {
            x: AxisParams {
                range: x_range,
                proj: bounds.x,
                major: x_info.major,
                minor: x_info.minor,
                labels: x_info.labels,
            },
            y: AxisParams {
                range: y_range,
                proj: bounds.y,
                major: y_info.major,
                minor: y_info.minor,
                labels: y_info.labels,
            },
            orientation: Some((90.0, 0.0, x_range.mid())),
        })
    }

    fn transform(&self, data: &DataFrame, panel: &PanelParams) -> Result<DataFrame> {
        let (px, py) = self.to_panel(data.require_number("x")?, data.require_number("y")?, panel);
        let mut out = data.clone();
        out.insert("x", Column::Number(px))?;
        out.insert("y", Column::Number(py))?;
        Ok(out)
    }

    fn render_bg(&self, panel: &PanelParams, theme: &Theme) -> Result<Grob> {
        let x_grid = grid_range(panel.x.range, 180.0);
        let y_grid = grid_range(panel.y.range, 90.0);

        let x_lines = self.grid_lines(&panel.x.major, y_grid, true, panel);
        let y_lines = self.grid_lines(&panel.y.major, x_grid, false, panel);
        if x_lines.is_empty() {
            warn!(breaks = panel.x.major.len(), "no drawable longitude grid line");
        }
        if y_lines.is_empty() {
            warn!(breaks = panel.y.major.len(), "no drawable latitude grid line");
        }

        Ok(Grob::tree(
            "grill",
            vec![
                theme.panel_background_grob(),
                Grob::tree("x.major", vec![theme.grid_major_lines(x_lines)]),
                Grob::tree("y.major", vec![theme.grid_major_lines(y_lines)]),
            ],
        ))
    }

    fn render_axis_h(&self, panel: &PanelParams, theme: &Theme) -> Result<HorizontalAxes> {
        let axes = match self.config.x_axis {
            HorizontalPosition::Bottom => {
                HorizontalAxes { top: Grob::Null, bottom: self.guide_mark(Side::Bottom, panel, theme) }
            }
            HorizontalPosition::Top => {
                HorizontalAxes { top: self.guide_mark(Side::Top, panel, theme), bottom: Grob::Null }
            }
        };
        Ok(axes)
    }

    fn render_axis_v(&self, panel: &PanelParams, theme: &Theme) -> Result<VerticalAxes> {
        let axes = match self.config.y_axis {
            VerticalPosition::Left => {
                VerticalAxes { left: self.guide_mark(Side::Left, panel, theme), right: Grob::Null }
            }
            VerticalPosition::Right => {
                VerticalAxes { left: Grob::Null, right: self.guide_mark(Side::Right, panel, theme) }
            }
        };
        Ok(axes)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_forward_clamps_out_of_range(lon in -720.0f64..720.0, lat in -180.0f64..180.0) {
            let coord = CoordProj::robinson().unwrap();
            let raw = coord.project(&[lon], &[lat]);
            let clamped = coord.project(&[clamp_lon(lon)], &[clamp_lat(lat)]);
            prop_assert_eq!(raw.x[0].to_bits(), clamped.x[0].to_bits());
            prop_assert_eq!(raw.y[0].to_bits(), clamped.y[0].to_bits());
        }

        #[test]
        fn prop_row_count_invariant(points in prop::collection::vec((prop::option::of(-180.0f64..180.0), -90.0f64..90.0), 0..40)) {
            let coord = CoordProj::robinson().unwrap();
            let xs: Vec<f64> = points.iter().map(|(x, _)| x.unwrap_or(f64::NAN)).collect();
            let ys: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
            let out = coord.project(&xs, &ys);
            prop_assert_eq!(out.x.len(), xs.len());
            prop_assert_eq!(out.y.len(), ys.len());
            for (x, px) in xs.iter().zip(&out.x) {
                prop_assert_eq!(x.is_nan(), px.is_nan());
            }
        }

        #[test]
        fn prop_grid_range_within_half_width(a in -500.0f64..500.0, w in 0.0f64..400.0) {
            let r = Range::new(a, a + w);
            let g = grid_range(r, 90.0);
            prop_assert!(g.span() <= 180.0 + 1e-9);
            prop_assert!(g.contains(r.mid()));
        }
    }
}
