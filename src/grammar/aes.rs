//! Aesthetic mappings.
//!
//! Maps data columns onto the canonical position columns and carries the
//! fixed (non-mapped) visual values of a layer.

use crate::color::Rgba;
use crate::error::{Error, Result};

use super::data::DataFrame;

/// Aesthetic mapping specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aes {
    /// X position mapping (column name).
    pub x: Option<String>,
    /// Y position mapping (column name).
    pub y: Option<String>,
    /// Segment end x (column name).
    pub xend: Option<String>,
    /// Segment end y (column name).
    pub yend: Option<String>,
    /// Group mapping (column name).
    pub group: Option<String>,

    // Fixed values (not data-mapped)
    /// Fixed stroke colour.
    pub color_value: Option<Rgba>,
    /// Fixed fill colour.
    pub fill_value: Option<Rgba>,
    /// Fixed point size.
    pub size_value: Option<f64>,
    /// Fixed line width.
    pub linewidth_value: Option<f64>,
    /// Fixed alpha value.
    pub alpha_value: Option<f64>,
}

impl Aes {
    /// Create a new aesthetic mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.y = Some(column.to_string());
        self
    }

    /// Map segment end x to a column.
    #[must_use]
    pub fn xend(mut self, column: &str) -> Self {
        self.xend = Some(column.to_string());
        self
    }

    /// Map segment end y to a column.
    #[must_use]
    pub fn yend(mut self, column: &str) -> Self {
        self.yend = Some(column.to_string());
        self
    }

    /// Map group to a column.
    #[must_use]
    pub fn group(mut self, column: &str) -> Self {
        self.group = Some(column.to_string());
        self
    }

    /// Set a fixed colour.
    #[must_use]
    pub fn color_value(mut self, color: Rgba) -> Self {
        self.color_value = Some(color);
        self
    }

    /// Set a fixed fill.
    #[must_use]
    pub fn fill_value(mut self, fill: Rgba) -> Self {
        self.fill_value = Some(fill);
        self
    }

    /// Set a fixed size value.
    #[must_use]
    pub fn size_value(mut self, size: f64) -> Self {
        self.size_value = Some(size);
        self
    }

    /// Set a fixed line width.
    #[must_use]
    pub fn linewidth_value(mut self, width: f64) -> Self {
        self.linewidth_value = Some(width);
        self
    }

    /// Set a fixed alpha value, clamped to `[0, 1]`.
    #[must_use]
    pub fn alpha_value(mut self, alpha: f64) -> Self {
        self.alpha_value = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Merge another Aes, with other taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        Aes {
            x: other.x.clone().or_else(|| self.x.clone()),
            y: other.y.clone().or_else(|| self.y.clone()),
            xend: other.xend.clone().or_else(|| self.xend.clone()),
            yend: other.yend.clone().or_else(|| self.yend.clone()),
            group: other.group.clone().or_else(|| self.group.clone()),
            color_value: other.color_value.or(self.color_value),
            fill_value: other.fill_value.or(self.fill_value),
            size_value: other.size_value.or(self.size_value),
            linewidth_value: other.linewidth_value.or(self.linewidth_value),
            alpha_value: other.alpha_value.or(self.alpha_value),
        }
    }

    /// Copy mapped columns onto their canonical names (`x`, `y`, `xend`,
    /// `yend`, `group`). Source columns stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if a mapped column does not exist.
    pub fn map_data(&self, data: &DataFrame) -> Result<DataFrame> {
        let mut out = data.clone();
        let mappings = [
            ("x", &self.x),
            ("y", &self.y),
            ("xend", &self.xend),
            ("yend", &self.yend),
            ("group", &self.group),
        ];
        for (canonical, source) in mappings {
            if let Some(source) = source {
                let column = data.get(source).ok_or_else(|| Error::MissingColumn(source.clone()))?;
                out.insert(canonical, column.clone())?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_merge() {
        let base = Aes::new().x("lon").y("lat").color_value(Rgba::BLACK);
        let over = Aes::new().y("height").size_value(3.0);
        let merged = base.merge(&over);
        assert_eq!(merged.x.as_deref(), Some("lon"));
        assert_eq!(merged.y.as_deref(), Some("height"));
        assert_eq!(merged.color_value, Some(Rgba::BLACK));
        assert_eq!(merged.size_value, Some(3.0));
    }

    #[test]
    fn test_map_data_copies_columns() {
        let data = DataFrame::new()
            .with_number("lon", vec![10.0, 20.0])
            .unwrap()
            .with_number("lat", vec![1.0, 2.0])
            .unwrap();
        let mapped = Aes::new().x("lon").y("lat").map_data(&data).unwrap();
        assert_eq!(mapped.number("x").unwrap(), &[10.0, 20.0]);
        assert_eq!(mapped.number("y").unwrap(), &[1.0, 2.0]);
        assert!(mapped.has_column("lon"));
    }

    #[test]
    fn test_map_data_missing() {
        let data = DataFrame::from_xy(&[1.0], &[2.0]);
        let err = Aes::new().group("id").map_data(&data).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "id"));
    }

    #[test]
    fn test_alpha_clamped() {
        assert_eq!(Aes::new().alpha_value(1.5).alpha_value, Some(1.0));
        assert_eq!(Aes::new().alpha_value(-0.5).alpha_value, Some(0.0));
    }
}
