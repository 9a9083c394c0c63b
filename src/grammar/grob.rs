//! Drawable primitives in panel space.
//!
//! Coordinates are npc: `(0, 0)` is the bottom-left of the panel and
//! `(1, 1)` the top-right. Encoders map them to device units.

use crate::color::Rgba;
use crate::geometry::Point;

/// Graphical parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gpar {
    /// Stroke colour; `None` draws no outline.
    pub colour: Option<Rgba>,
    /// Fill colour; `None` leaves shapes unfilled.
    pub fill: Option<Rgba>,
    /// Stroke width in device units.
    pub linewidth: f64,
}

impl Default for Gpar {
    fn default() -> Self {
        Self { colour: Some(Rgba::BLACK), fill: None, linewidth: 0.5 }
    }
}

impl Gpar {
    /// Stroke only.
    #[must_use]
    pub fn stroke(colour: Rgba, linewidth: f64) -> Self {
        Self { colour: Some(colour), fill: None, linewidth }
    }

    /// Fill only.
    #[must_use]
    pub fn filled(fill: Rgba) -> Self {
        Self { colour: None, fill: Some(fill), linewidth: 0.0 }
    }
}

/// Side of the panel an axis guide is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Above the panel.
    Top,
    /// Below the panel.
    Bottom,
    /// Left of the panel.
    Left,
    /// Right of the panel.
    Right,
}

impl Side {
    /// Whether ticks run along the x axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// A graphical object.
#[derive(Debug, Clone, PartialEq)]
pub enum Grob {
    /// Draws nothing.
    Null,
    /// Axis-aligned rectangle from `(x, y)` (bottom-left).
    Rect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Style.
        gp: Gpar,
    },
    /// One or more separate open lines.
    Polyline {
        /// Each inner vector is one line.
        lines: Vec<Vec<Point>>,
        /// Style.
        gp: Gpar,
    },
    /// A closed shape.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Style.
        gp: Gpar,
    },
    /// Independent straight segments.
    Segments {
        /// `(start, end)` pairs.
        segments: Vec<(Point, Point)>,
        /// Style.
        gp: Gpar,
    },
    /// Filled circles.
    Points {
        /// Centres.
        points: Vec<Point>,
        /// Diameter in device units.
        size: f64,
        /// Style (fill is the dot colour).
        gp: Gpar,
    },
    /// Axis guide: tick marks and labels along one side.
    Axis {
        /// Panel side.
        side: Side,
        /// Tick positions along the axis (npc).
        at: Vec<f64>,
        /// One label per tick.
        labels: Vec<String>,
        /// Tick and label colour.
        gp: Gpar,
    },
    /// Named group of children, drawn in order.
    Tree {
        /// Group name.
        name: String,
        /// Children.
        children: Vec<Grob>,
    },
}

impl Grob {
    /// Named group.
    #[must_use]
    pub fn tree(name: impl Into<String>, children: Vec<Grob>) -> Self {
        Grob::Tree { name: name.into(), children }
    }

    /// Whether this draws nothing at all.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Grob::Null => true,
            Grob::Tree { children, .. } => children.iter().all(Grob::is_null),
            _ => false,
        }
    }

    /// Tree name, if this is a tree.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Grob::Tree { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Find a direct child tree by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Grob> {
        match self {
            Grob::Tree { children, .. } => children.iter().find(|c| c.name() == Some(name)),
            _ => None,
        }
    }

    /// Every leaf, depth first.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Grob> {
        match self {
            Grob::Tree { children, .. } => children.iter().flat_map(Grob::leaves).collect(),
            Grob::Null => Vec::new(),
            leaf => vec![leaf],
        }
    }
}
