//! Continuous position scales.
//!
//! A position scale tracks the data range of one axis across every layer,
//! expands it for display, and produces break/label metadata.

use crate::geometry::Range;

use super::breaks::{self, TARGET_BREAKS};
use super::data::DataFrame;

/// Which position aesthetic a scale serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
}

impl Axis {
    /// Columns that carry positions on this axis.
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Axis::X => &["x", "xend", "xmin", "xmax"],
            Axis::Y => &["y", "yend", "ymin", "ymax"],
        }
    }
}

/// How major breaks are chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Breaks {
    /// Extended breaks aiming at `n` labels.
    #[default]
    Extended,
    /// Exactly these positions (censored to the range).
    Manual(Vec<f64>),
    /// No breaks.
    None,
}

/// How major breaks are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// Plain numbers with a shared number of decimals.
    #[default]
    Number,
    /// Degrees east/west (`120°W`, `0°`, `30°E`).
    Longitude,
    /// Degrees north/south (`30°N`, `0°`, `45°S`).
    Latitude,
}

impl LabelFormat {
    /// Label every break.
    #[must_use]
    pub fn format(self, values: &[f64]) -> Vec<String> {
        let decimals = shared_decimals(values);
        let plain = |v: f64| format_fixed(v, decimals);
        values
            .iter()
            .map(|&v| match self {
                LabelFormat::Number => plain(v),
                LabelFormat::Longitude => hemisphere(v, plain(v.abs()), 'E', 'W', 180.0),
                LabelFormat::Latitude => hemisphere(v, plain(v.abs()), 'N', 'S', f64::INFINITY),
            })
            .collect()
    }
}

fn hemisphere(v: f64, magnitude: String, pos: char, neg: char, antimeridian: f64) -> String {
    if v == 0.0 || v.abs() == antimeridian {
        format!("{magnitude}°")
    } else if v > 0.0 {
        format!("{magnitude}°{pos}")
    } else {
        format!("{magnitude}°{neg}")
    }
}

/// Fewest decimals (up to 10) that represent every value exactly.
fn shared_decimals(values: &[f64]) -> usize {
    (0..=10)
        .find(|&d| {
            let p = 10f64.powi(d as i32);
            values
                .iter()
                .filter(|v| v.is_finite())
                .all(|v| ((v * p).round() / p - v).abs() <= 1e-9 * v.abs().max(1.0))
        })
        .unwrap_or(10)
}

fn format_fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    // -0 prints as "-0"
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

/// Multiplicative and additive padding around a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    /// Fraction of the width added on each side.
    pub mult: f64,
    /// Absolute amount added on each side.
    pub add: f64,
}

impl Default for Expansion {
    /// The default for continuous position scales: 5 % each side.
    fn default() -> Self {
        Self { mult: 0.05, add: 0.0 }
    }
}

/// Expand `range` by `mult` of its width plus `add` on each side.
///
/// A zero-width range is widened to `zero_width` in total instead.
#[must_use]
pub fn expand_range(range: Range, mult: f64, add: f64, zero_width: f64) -> Range {
    if range.span().abs() < 1e-10 * range.max.abs().max(1.0) {
        return Range::new(range.min - zero_width / 2.0, range.max + zero_width / 2.0);
    }
    let pad = range.span() * mult + add;
    Range::new(range.min - pad, range.max + pad)
}

/// Linearly map `v` from `from` onto `[0, 1]`; values outside extrapolate.
#[must_use]
pub fn rescale(v: f64, from: Range) -> f64 {
    (v - from.min) / (from.max - from.min)
}

/// Break metadata for one axis over a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakInfo {
    /// Range the breaks were computed for (data units).
    pub range: Range,
    /// Major break positions (data units), inside `range`.
    pub major: Vec<f64>,
    /// Minor break positions (data units), inside `range`, majors excluded.
    pub minor: Vec<f64>,
    /// One label per major break.
    pub labels: Vec<String>,
}

/// A continuous position scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    axis: Axis,
    trained: Option<Range>,
    limits: Option<Range>,
    breaks: Breaks,
    labels: LabelFormat,
    expand: Expansion,
}

impl ContinuousScale {
    /// Create an untrained scale for `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            trained: None,
            limits: None,
            breaks: Breaks::default(),
            labels: LabelFormat::default(),
            expand: Expansion::default(),
        }
    }

    /// Horizontal scale.
    #[must_use]
    pub fn x() -> Self {
        Self::new(Axis::X)
    }

    /// Vertical scale.
    #[must_use]
    pub fn y() -> Self {
        Self::new(Axis::Y)
    }

    /// Fix the limits instead of deriving them from data.
    #[must_use]
    pub fn limits(mut self, min: f64, max: f64) -> Self {
        self.limits = Some(Range::new(min, max));
        self
    }

    /// Set how majors are chosen.
    #[must_use]
    pub fn breaks(mut self, breaks: Breaks) -> Self {
        self.breaks = breaks;
        self
    }

    /// Set the label format.
    #[must_use]
    pub fn labels(mut self, labels: LabelFormat) -> Self {
        self.labels = labels;
        self
    }

    /// Set the display expansion.
    #[must_use]
    pub fn expand(mut self, expand: Expansion) -> Self {
        self.expand = expand;
        self
    }

    /// The axis this scale serves.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The label format.
    #[must_use]
    pub fn label_format(&self) -> LabelFormat {
        self.labels
    }

    /// Widen the trained range with the finite values of `values`.
    pub fn train_values(&mut self, values: &[f64]) {
        if let Some(r) = Range::of_finite(values) {
            self.trained = Some(match self.trained {
                Some(t) => t.union(r),
                None => r,
            });
        }
    }

    /// Train on every position column of this axis present in `data`.
    pub fn train(&mut self, data: &DataFrame) {
        for column in self.axis.columns() {
            if let Some(values) = data.number(column) {
                self.train_values(values);
            }
        }
    }

    /// Explicit limits, else the trained range.
    #[must_use]
    pub fn get_limits(&self) -> Option<Range> {
        self.limits.or(self.trained)
    }

    /// Limits expanded for display.
    #[must_use]
    pub fn dimension(&self) -> Option<Range> {
        self.get_limits().map(|r| expand_range(r, self.expand.mult, self.expand.add, 1.0))
    }

    /// Majors inside `range`.
    #[must_use]
    pub fn get_breaks(&self, range: Range) -> Vec<f64> {
        let candidates = match &self.breaks {
            Breaks::Extended => breaks::extended(range.min, range.max, TARGET_BREAKS),
            Breaks::Manual(v) => v.clone(),
            Breaks::None => Vec::new(),
        };
        breaks::censor(&candidates, range.as_tuple())
    }

    /// Majors, minors and labels over `range`.
    #[must_use]
    pub fn break_info(&self, range: Range) -> BreakInfo {
        let major = self.get_breaks(range);
        let minor = breaks::censor(&breaks::regular_minor(&major, range.as_tuple(), 2), range.as_tuple())
            .into_iter()
            .filter(|m| !major.iter().any(|b| (b - m).abs() <= range.span().abs() * 1e-10))
            .collect();
        let labels = self.labels.format(&major);
        BreakInfo { range, major, minor, labels }
    }
}
