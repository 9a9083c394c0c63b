//! Lollipop charts: a stem from the baseline to each value, capped by a dot.

use crate::color::Rgba;
use crate::error::Result;
use crate::grammar::{Aes, Coord, DataFrame, Geom, GeomPoint, GeomSegment, Grob, PanelParams, Style};

/// Point size relative to the stem width when none is set.
pub const POINT_SIZE_RATIO: f64 = 2.5;

/// Segment from zero to each `(x, y)` plus a point on top.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeomLollipop {
    horizontal: bool,
    point_colour: Option<Rgba>,
    point_size: Option<f64>,
}

impl GeomLollipop {
    /// Vertical stems from `y = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stems from `x = 0` instead.
    #[must_use]
    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Colour of the dots (the stem colour otherwise).
    #[must_use]
    pub fn point_colour(mut self, colour: Rgba) -> Self {
        self.point_colour = Some(colour);
        self
    }

    /// Size of the dots in mm.
    #[must_use]
    pub fn point_size(mut self, size: f64) -> Self {
        self.point_size = Some(size);
        self
    }
}

impl Geom for GeomLollipop {
    fn name(&self) -> &'static str {
        "lollipop"
    }

    fn required(&self) -> &'static [&'static str] {
        &["x", "y", "xend", "yend"]
    }

    fn setup_data(&self, data: DataFrame) -> Result<DataFrame> {
        let n = data.nrow();
        if self.horizontal {
            let y = data.require_number("y")?.to_vec();
            data.with_number("xend", vec![0.0; n])?.with_number("yend", y)
        } else {
            let x = data.require_number("x")?.to_vec();
            data.with_number("xend", x)?.with_number("yend", vec![0.0; n])
        }
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let stem = Style::default().resolve(aes);
        let point_aes = aes
            .clone()
            .color_value(self.point_colour.unwrap_or(stem.colour))
            .size_value(self.point_size.unwrap_or(stem.linewidth * POINT_SIZE_RATIO));

        let segments = GeomSegment.draw_panel(data, panel, coord, aes)?;
        let points = GeomPoint.draw_panel(data, panel, coord, &point_aes)?;
        if segments.is_null() && points.is_null() {
            return Ok(Grob::Null);
        }
        Ok(Grob::tree("lollipop", vec![segments, points]))
    }
}
