//! Theme system.
//!
//! Controls the non-data visual appearance of plots and builds the theme
//! elements coords draw with.

use crate::color::Rgba;
use crate::geometry::Point;

use super::grob::{Gpar, Grob};

/// Theme specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Plot background colour.
    pub background: Rgba,
    /// Panel background colour.
    pub panel_background: Rgba,
    /// Major grid line colour.
    pub grid_major: Rgba,
    /// Minor grid line colour.
    pub grid_minor: Rgba,
    /// Axis tick and label colour.
    pub axis_color: Rgba,
    /// Show grid lines.
    pub show_grid: bool,
    /// Show axis guides.
    pub show_axis: bool,
    /// Major grid line width.
    pub grid_width: f64,
    /// Axis label font size.
    pub text_size: f64,
    /// Margin around the panel, in device units.
    pub margin: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Grey panel with white grid lines.
    #[must_use]
    pub fn grey() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::GREY92,
            grid_major: Rgba::WHITE,
            grid_minor: Rgba::WHITE,
            axis_color: Rgba::GREY30,
            show_grid: true,
            show_axis: true,
            grid_width: 1.0,
            text_size: 11.0,
            margin: 48,
        }
    }

    /// White panel with light grey grid lines.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_major: Rgba::rgb(220, 220, 220),
            grid_minor: Rgba::rgb(235, 235, 235),
            grid_width: 0.5,
            ..Self::grey()
        }
    }

    /// Black and white theme.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_major: Rgba::rgb(200, 200, 200),
            grid_minor: Rgba::rgb(230, 230, 230),
            axis_color: Rgba::BLACK,
            grid_width: 0.5,
            ..Self::grey()
        }
    }

    /// Nothing but data: no panel fill, grid or axes.
    #[must_use]
    pub fn void() -> Self {
        Self {
            panel_background: Rgba::TRANSPARENT,
            show_grid: false,
            show_axis: false,
            margin: 10,
            ..Self::grey()
        }
    }

    /// Set panel background colour.
    #[must_use]
    pub fn panel_background(mut self, color: Rgba) -> Self {
        self.panel_background = color;
        self
    }

    /// Set major grid colour.
    #[must_use]
    pub fn grid_color(mut self, color: Rgba) -> Self {
        self.grid_major = color;
        self
    }

    /// Set margin.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Enable or disable axis guides.
    #[must_use]
    pub fn axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }

    /// Full-panel background rectangle.
    #[must_use]
    pub fn panel_background_grob(&self) -> Grob {
        Grob::Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0, gp: Gpar::filled(self.panel_background) }
    }

    /// Major grid lines; [`Grob::Null`] when hidden or empty.
    #[must_use]
    pub fn grid_major_lines(&self, lines: Vec<Vec<Point>>) -> Grob {
        self.grid_lines(lines, self.grid_major, self.grid_width)
    }

    /// Minor grid lines at half the major width.
    #[must_use]
    pub fn grid_minor_lines(&self, lines: Vec<Vec<Point>>) -> Grob {
        self.grid_lines(lines, self.grid_minor, self.grid_width / 2.0)
    }

    fn grid_lines(&self, lines: Vec<Vec<Point>>, colour: Rgba, width: f64) -> Grob {
        if !self.show_grid || lines.is_empty() {
            return Grob::Null;
        }
        Grob::Polyline { lines, gp: Gpar::stroke(colour, width) }
    }

    /// Style of axis ticks and labels.
    #[must_use]
    pub fn axis_gpar(&self) -> Gpar {
        Gpar::stroke(self.axis_color, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_grey() {
        let t = Theme::grey();
        assert!(t.show_grid);
        assert_eq!(t.panel_background, Rgba::GREY92);
    }

    #[test]
    fn test_void_hides_grid() {
        let t = Theme::void();
        let line = vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]];
        assert_eq!(t.grid_major_lines(line), Grob::Null);
        assert!(!t.show_axis);
    }

    #[test]
    fn test_empty_grid_is_null() {
        assert_eq!(Theme::grey().grid_major_lines(Vec::new()), Grob::Null);
    }

    #[test]
    fn test_builders() {
        let t = Theme::bw().grid(false).axis(false).margin(5).grid_color(Rgba::BLACK);
        assert!(!t.show_grid && !t.show_axis);
        assert_eq!(t.margin, 5);
        assert_eq!(t.grid_major, Rgba::BLACK);
    }
}
