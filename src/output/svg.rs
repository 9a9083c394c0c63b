//! SVG output encoder.
//!
//! [`SvgEncoder`] collects device-space elements. [`SvgEncoder::from_plot`]
//! lays out a [`BuiltPlot`]: panel grobs in npc are mapped onto the panel
//! rectangle (y flipped), axis guides go into the margins around it. Coords
//! with a fixed aspect ratio get the largest centred panel of that shape.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::{BuiltPlot, Gpar, Grob, Side};

/// Tick length in device units.
const TICK_LENGTH: f64 = 4.0;
/// Room reserved for a vertical axis's labels.
const AXIS_WIDTH: f64 = 40.0;
/// Room reserved for a horizontal axis's labels.
const AXIS_HEIGHT: f64 = 24.0;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f64,
    },
    /// Circle
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgba,
    },
    /// Line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgba,
        stroke_width: f64,
    },
    /// Polyline, or polygon when filled or closed
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Option<Rgba>,
        stroke_width: f64,
        fill: Option<Rgba>,
        closed: bool,
    },
    /// Text
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: Rgba,
        anchor: TextAnchor,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Panel rectangle in device units.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn map(&self, p: Point) -> (f64, f64) {
        (self.x + p.x * self.width, self.y + (1.0 - p.y) * self.height)
    }

    /// Largest centred rectangle inside `self` with `height / width == aspect`.
    fn fit(self, aspect: Option<f64>) -> Self {
        let Some(aspect) = aspect.filter(|a| a.is_finite() && *a > 0.0) else {
            return self;
        };
        if self.height / self.width > aspect {
            let height = self.width * aspect;
            Self { y: self.y + (self.height - height) / 2.0, height, ..self }
        } else {
            let width = self.height / aspect;
            Self { x: self.x + (self.width - width) / 2.0, width, ..self }
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Lay out a built plot.
    #[must_use]
    pub fn from_plot(plot: &BuiltPlot) -> Self {
        let mut encoder = Self::new(plot.width, plot.height).background(Some(plot.theme.background));
        let margin = f64::from(plot.theme.margin);
        let text_size = plot.theme.text_size;

        let title_height = if plot.title.is_some() { text_size * 2.0 } else { 0.0 };
        let left = if plot.axis_v.left.is_null() { 0.0 } else { AXIS_WIDTH };
        let right = if plot.axis_v.right.is_null() { 0.0 } else { AXIS_WIDTH };
        let top = if plot.axis_h.top.is_null() { 0.0 } else { AXIS_HEIGHT };
        let bottom = if plot.axis_h.bottom.is_null() { 0.0 } else { AXIS_HEIGHT };

        let x = margin + left;
        let y = margin + title_height + top;
        let viewport = Viewport {
            x,
            y,
            width: (f64::from(plot.width) - x - margin - right).max(1.0),
            height: (f64::from(plot.height) - y - margin - bottom).max(1.0),
        }
        .fit(plot.aspect);

        encoder.draw(&plot.background, viewport, text_size);
        for layer in &plot.layers {
            encoder.draw(layer, viewport, text_size);
        }
        for axis in [&plot.axis_h.bottom, &plot.axis_h.top, &plot.axis_v.left, &plot.axis_v.right] {
            encoder.draw(axis, viewport, text_size);
        }
        if let Some(title) = &plot.title {
            encoder.add_element(SvgElement::Text {
                x: viewport.x,
                y: margin + text_size * 1.2,
                text: title.clone(),
                font_size: text_size * 1.2,
                fill: plot.theme.axis_color,
                anchor: TextAnchor::Start,
            });
        }
        encoder
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a filled rectangle.
    #[must_use]
    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, fill: Some(fill), stroke: None, stroke_width: 1.0 });
        self
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(mut self, cx: f64, cy: f64, r: f64, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Circle { cx, cy, r, fill });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, stroke_width: f64) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add an open polyline.
    #[must_use]
    pub fn polyline(mut self, points: &[(f64, f64)], stroke: Rgba, stroke_width: f64) -> Self {
        self.elements.push(SvgElement::Polyline {
            points: points.to_vec(),
            stroke: Some(stroke),
            stroke_width,
            fill: None,
            closed: false,
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(mut self, x: f64, y: f64, text: &str, font_size: f64, fill: Rgba, anchor: TextAnchor) -> Self {
        self.elements.push(SvgElement::Text { x, y, text: text.to_string(), font_size, fill, anchor });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements added so far.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    fn draw(&mut self, grob: &Grob, vp: Viewport, text_size: f64) {
        match grob {
            Grob::Null => {}
            Grob::Tree { children, .. } => {
                for child in children {
                    self.draw(child, vp, text_size);
                }
            }
            Grob::Rect { x, y, width, height, gp } => {
                let (x0, y0) = vp.map(Point::new(*x, y + height));
                self.add_element(SvgElement::Rect {
                    x: x0,
                    y: y0,
                    width: width * vp.width,
                    height: height * vp.height,
                    fill: gp.fill,
                    stroke: gp.colour,
                    stroke_width: gp.linewidth,
                });
            }
            Grob::Polyline { lines, gp } => {
                let Some(stroke) = gp.colour else { return };
                for line in lines.iter().filter(|l| l.len() >= 2) {
                    self.add_element(SvgElement::Polyline {
                        points: line.iter().map(|p| vp.map(*p)).collect(),
                        stroke: Some(stroke),
                        stroke_width: gp.linewidth,
                        fill: None,
                        closed: false,
                    });
                }
            }
            Grob::Polygon { points, gp } => {
                if points.len() < 3 || (gp.colour.is_none() && gp.fill.is_none()) {
                    return;
                }
                self.add_element(SvgElement::Polyline {
                    points: points.iter().map(|p| vp.map(*p)).collect(),
                    stroke: gp.colour,
                    stroke_width: gp.linewidth,
                    fill: gp.fill,
                    closed: true,
                });
            }
            Grob::Segments { segments, gp } => {
                let Some(stroke) = gp.colour else { return };
                for (a, b) in segments {
                    let (x1, y1) = vp.map(*a);
                    let (x2, y2) = vp.map(*b);
                    self.add_element(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width: gp.linewidth });
                }
            }
            Grob::Points { points, size, gp } => {
                let Some(fill) = gp.fill.or(gp.colour) else { return };
                for p in points {
                    let (cx, cy) = vp.map(*p);
                    self.add_element(SvgElement::Circle { cx, cy, r: size / 2.0, fill });
                }
            }
            Grob::Axis { side, at, labels, gp } => self.draw_axis(*side, at, labels, gp, vp, text_size),
        }
    }

    fn draw_axis(&mut self, side: Side, at: &[f64], labels: &[String], gp: &Gpar, vp: Viewport, text_size: f64) {
        let colour = gp.colour.unwrap_or(Rgba::BLACK);
        for (pos, label) in at.iter().zip(labels) {
            let (x1, y1, x2, y2, tx, ty, anchor) = match side {
                Side::Bottom => {
                    let x = vp.x + pos * vp.width;
                    let y = vp.y + vp.height;
                    (x, y, x, y + TICK_LENGTH, x, y + TICK_LENGTH + text_size, TextAnchor::Middle)
                }
                Side::Top => {
                    let x = vp.x + pos * vp.width;
                    (x, vp.y, x, vp.y - TICK_LENGTH, x, vp.y - TICK_LENGTH - 2.0, TextAnchor::Middle)
                }
                Side::Left => {
                    let y = vp.y + (1.0 - pos) * vp.height;
                    let tx = vp.x - TICK_LENGTH - 2.0;
                    (vp.x, y, vp.x - TICK_LENGTH, y, tx, y + text_size / 3.0, TextAnchor::End)
                }
                Side::Right => {
                    let x = vp.x + vp.width;
                    let y = vp.y + (1.0 - pos) * vp.height;
                    (x, y, x + TICK_LENGTH, y, x + TICK_LENGTH + 2.0, y + text_size / 3.0, TextAnchor::Start)
                }
            };
            self.add_element(SvgElement::Line { x1, y1, x2, y2, stroke: colour, stroke_width: gp.linewidth });
            self.add_element(SvgElement::Text {
                x: tx,
                y: ty,
                text: label.clone(),
                font_size: text_size,
                fill: colour,
                anchor,
            });
        }
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn paint(colour: Option<Rgba>) -> String {
    colour.map_or_else(|| "none".to_string(), Rgba::to_css)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
                .unwrap_or_default();
            format!(r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}/>"#, paint(*fill))
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, fill.to_css())
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Polyline { points, stroke, stroke_width, fill, closed } => {
            let points_str = points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
            let tag = if *closed || fill.is_some() { "polygon" } else { "polyline" };
            format!(
                r#"<{tag} points="{points_str}" fill="{}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                paint(*fill),
                paint(*stroke)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif">{}</text>"#,
                fill.to_css(),
                escape(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord_proj::CoordProj;
    use crate::grammar::{GeomPoint, Plot};

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_primitives() {
        let svg = SvgEncoder::new(100, 100)
            .rect(10.0, 20.0, 30.0, 40.0, Rgba::BLACK)
            .circle(50.0, 50.0, 25.0, Rgba::WHITE)
            .line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0)
            .polyline(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], Rgba::BLACK, 1.5)
            .render();
        assert!(svg.contains(r#"<rect x="10" y="20" width="30" height="40" fill="rgb(0,0,0)"/>"#));
        assert!(svg.contains(r#"cx="50" cy="50" r="25""#));
        assert!(svg.contains(r#"x2="100" y2="100""#));
        assert!(svg.contains(r#"<polyline points="0,0 50,100 100,0" fill="none""#));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(10.0, 50.0, "<b>A & B</b>", 12.0, Rgba::BLACK, TextAnchor::Middle)
            .render();
        assert!(!svg.contains("<b>"));
        assert!(svg.contains("&lt;b&gt;A &amp; B&lt;/b&gt;"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_unfilled_polygon() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Polyline {
            points: vec![(0.0, 0.0), (10.0, 0.0), (5.0, 5.0)],
            stroke: Some(Rgba::BLACK),
            stroke_width: 1.0,
            fill: None,
            closed: true,
        });
        let svg = encoder.render();
        assert!(svg.contains(r#"<polygon points="0,0 10,0 5,5" fill="none" stroke="rgb(0,0,0)""#));
    }

    #[test]
    fn test_viewport_flips_y() {
        let vp = Viewport { x: 10.0, y: 20.0, width: 100.0, height: 50.0 };
        assert_eq!(vp.map(Point::new(0.0, 0.0)), (10.0, 70.0));
        assert_eq!(vp.map(Point::new(1.0, 1.0)), (110.0, 20.0));
    }

    #[test]
    fn test_viewport_fit_letterboxes() {
        let vp = Viewport { x: 0.0, y: 0.0, width: 200.0, height: 100.0 };
        let tall = vp.fit(Some(1.0));
        assert_eq!((tall.x, tall.y, tall.width, tall.height), (50.0, 0.0, 100.0, 100.0));
        let wide = vp.fit(Some(0.25));
        assert_eq!((wide.x, wide.y, wide.width, wide.height), (0.0, 25.0, 200.0, 50.0));
        for aspect in [None, Some(f64::NAN), Some(0.0), Some(f64::INFINITY)] {
            let same = vp.fit(aspect);
            assert_eq!((same.x, same.y, same.width, same.height), (0.0, 0.0, 200.0, 100.0));
        }
    }

    #[test]
    fn test_from_plot_keeps_projected_aspect() {
        let built = Plot::new()
            .data_xy(&[-150.0, 150.0], &[-60.0, 60.0])
            .geom(GeomPoint)
            .coord(CoordProj::robinson().unwrap())
            .dimensions(600, 600)
            .build()
            .unwrap();
        let aspect = built.aspect.unwrap();
        let encoder = SvgEncoder::from_plot(&built);
        let Some(SvgElement::Rect { width, height, .. }) = encoder.elements().first() else {
            panic!("expected the panel background first");
        };
        assert!((height / width - aspect).abs() < 1e-9, "{height} / {width} vs {aspect}");
    }

    #[test]
    fn test_from_plot_draws_points_and_axes() {
        let built = Plot::new()
            .data_xy(&[0.0, 5.0, 10.0], &[0.0, 5.0, 10.0])
            .geom(GeomPoint)
            .dimensions(400, 300)
            .title("Three points")
            .build()
            .unwrap();
        let encoder = SvgEncoder::from_plot(&built);
        let circles = encoder.elements().iter().filter(|e| matches!(e, SvgElement::Circle { .. })).count();
        assert_eq!(circles, 3);
        let svg = encoder.render();
        assert!(svg.contains("Three points"));
        assert!(svg.contains("<text"));
        // every point lies on the canvas
        for e in encoder.elements() {
            if let SvgElement::Circle { cx, cy, .. } = e {
                assert!((0.0..=400.0).contains(cx) && (0.0..=300.0).contains(cy));
            }
        }
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        SvgEncoder::new(100, 100).rect(10.0, 10.0, 80.0, 80.0, Rgba::BLACK).write_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}
