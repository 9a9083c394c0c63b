//! Geometric primitives shared by the projection and drawing layers.

/// A 2D point in `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Cross product of `(a - self)` and `(b - self)`.
    #[must_use]
    pub fn cross(self, a: Self, b: Self) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// The extent of a batch with no finite member. Rescaling onto it yields NaN.
    pub const EMPTY: Self = Self { min: f64::NAN, max: f64::NAN };

    /// Create a range, ordering the bounds.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Range over the finite values of `values`, or `None` if there are none.
    #[must_use]
    pub fn of_finite(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self { min: r.min.min(v), max: r.max.max(v) }),
            })
    }

    /// Width of the interval.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Union with another range.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Whether `v` lies inside, with a relative tolerance on the bounds.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        let tol = self.span().abs() * 1e-10;
        v >= self.min - tol && v <= self.max + tol
    }

    /// `n` evenly spaced values from `min` to `max` inclusive.
    #[must_use]
    pub fn seq(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = self.span() / (n - 1) as f64;
                (0..n).map(|i| if i == n - 1 { self.max } else { self.min + step * i as f64 }).collect()
            }
        }
    }

    /// Whether either bound is non-finite.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite())
    }

    /// As a tuple.
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl From<(f64, f64)> for Range {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

/// Axis-aligned bounding box of projected points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Extent along x.
    pub x: Range,
    /// Extent along y.
    pub y: Range,
}

impl Bounds {
    /// Bounding box over the finite x values and the finite y values.
    #[must_use]
    pub fn of_points(xs: &[f64], ys: &[f64]) -> Option<Self> {
        Some(Self { x: Range::of_finite(xs)?, y: Range::of_finite(ys)? })
    }
}
