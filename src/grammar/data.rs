//! Columnar data frame passed between stats, coords and geoms.
//!
//! Columns keep their insertion order. Every column has the same length.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            DataValue::Text(_) => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            DataValue::Number(_) => None,
        }
    }

    fn group_key(&self) -> String {
        match self {
            DataValue::Number(n) => n.to_string(),
            DataValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

/// A typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric column; missing values are `NaN`.
    Number(Vec<f64>),
    /// Text column.
    Text(Vec<String>),
}

impl Column {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Number(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    /// Whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<DataValue> {
        match self {
            Column::Number(v) => v.get(row).map(|&n| DataValue::Number(n)),
            Column::Text(v) => v.get(row).map(|s| DataValue::Text(s.clone())),
        }
    }

    /// Rows at `indices`, in that order.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            Column::Number(v) => Column::Number(indices.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// `value` repeated `n` times, typed like the value.
    #[must_use]
    pub fn repeat(value: &DataValue, n: usize) -> Self {
        match value {
            DataValue::Number(x) => Column::Number(vec![*x; n]),
            DataValue::Text(s) => Column::Text(vec![s.clone(); n]),
        }
    }

    fn append(&mut self, other: &Column) -> bool {
        match (self, other) {
            (Column::Number(a), Column::Number(b)) => a.extend_from_slice(b),
            (Column::Text(a), Column::Text(b)) => a.extend(b.iter().cloned()),
            _ => return false,
        }
        true
    }
}

/// A simple columnar data frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: IndexMap<String, Column>,
    n_rows: usize,
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from x and y arrays, truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let mut columns = IndexMap::new();
        columns.insert("x".to_string(), Column::Number(x[..n].to_vec()));
        columns.insert("y".to_string(), Column::Number(y[..n].to_vec()));
        Self { columns, n_rows: n }
    }

    /// Add or replace a numeric column (builder form).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the length differs from the
    /// existing columns.
    pub fn with_number(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        self.insert(name, Column::Number(values))?;
        Ok(self)
    }

    /// Add or replace a text column (builder form).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn with_text(mut self, name: &str, values: Vec<String>) -> Result<Self> {
        self.insert(name, Column::Text(values))?;
        Ok(self)
    }

    /// Add or replace a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn insert(&mut self, name: &str, column: Column) -> Result<()> {
        let replacing_only = self.columns.len() == 1 && self.columns.contains_key(name);
        if !self.columns.is_empty() && !replacing_only && column.len() != self.n_rows {
            return Err(Error::DataLengthMismatch { x_len: self.n_rows, y_len: column.len() });
        }
        self.n_rows = column.len();
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    /// Numeric column by name.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Number(v)) => Some(v),
            _ => None,
        }
    }

    /// Numeric column by name, or a [`Error::MissingColumn`].
    ///
    /// # Errors
    ///
    /// Returns an error if the column is absent or not numeric.
    pub fn require_number(&self, name: &str) -> Result<&[f64]> {
        self.number(name).ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Text column by name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name) {
            Some(Column::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate `(name, column)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rows at `indices`, keeping every column.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.iter().map(|(k, c)| (k.clone(), c.take(indices))).collect(),
            n_rows: indices.len(),
        }
    }

    /// Split into one frame per distinct value of `column`, in order of
    /// first appearance. Without that column the whole frame is one group.
    #[must_use]
    pub fn split_by(&self, column: &str) -> Vec<Self> {
        let Some(col) = self.columns.get(column) else {
            return vec![self.clone()];
        };
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        for row in 0..self.n_rows {
            if let Some(v) = col.get(row) {
                groups.entry(v.group_key()).or_default().push(row);
            }
        }
        groups.values().map(|rows| self.take(rows)).collect()
    }

    /// Stack frames row-wise. Columns are taken from the first frame; a
    /// frame missing one of them, or typing it differently, is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] when the frames disagree on columns.
    pub fn concat(frames: &[Self]) -> Result<Self> {
        let Some((first, rest)) = frames.split_first() else {
            return Ok(Self::new());
        };
        let mut out = first.clone();
        for frame in rest {
            for (name, col) in &mut out.columns {
                let other = frame.columns.get(name).ok_or_else(|| Error::MissingColumn(name.clone()))?;
                if !col.append(other) {
                    return Err(Error::MissingColumn(format!("{name} (type differs between groups)")));
                }
            }
            out.n_rows += frame.n_rows;
        }
        Ok(out)
    }

    /// Value at (`name`, `row`).
    #[must_use]
    pub fn value(&self, name: &str, row: usize) -> Option<DataValue> {
        self.columns.get(name).and_then(|c| c.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled() -> DataFrame {
        DataFrame::from_xy(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0])
            .with_text("group", vec!["b".into(), "a".into(), "b".into(), "a".into()])
            .unwrap()
    }

    #[test]
    fn test_dataframe_from_xy() {
        let df = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(df.nrow(), 2);
        assert_eq!(df.columns().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(df.number("x").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let df = DataFrame::from_xy(&[1.0, 2.0], &[3.0, 4.0]);
        let err = df.with_number("size", vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::DataLengthMismatch { x_len: 2, y_len: 1 }));
    }

    #[test]
    fn test_replace_keeps_order() {
        let df = labelled().with_number("x", vec![0.0; 4]).unwrap();
        assert_eq!(df.columns().collect::<Vec<_>>(), vec!["x", "y", "group"]);
        assert_eq!(df.number("x").unwrap(), &[0.0; 4]);
    }

    #[test]
    fn test_split_by_first_appearance() {
        let groups = labelled().split_by("group");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].number("x").unwrap(), &[1.0, 3.0]);
        assert_eq!(groups[1].text("group").unwrap(), &["a".to_string(), "a".to_string()]);
        assert_eq!(labelled().split_by("missing").len(), 1);
    }

    #[test]
    fn test_concat_roundtrip() {
        let df = labelled();
        let back = DataFrame::concat(&df.split_by("group")).unwrap();
        assert_eq!(back.nrow(), 4);
        assert_eq!(back.number("x").unwrap(), &[1.0, 3.0, 2.0, 4.0]);
        assert_eq!(DataFrame::concat(&[]).unwrap().nrow(), 0);
    }

    #[test]
    fn test_concat_missing_column() {
        let a = labelled();
        let b = DataFrame::from_xy(&[1.0], &[2.0]);
        assert!(matches!(DataFrame::concat(&[a, b]), Err(Error::MissingColumn(_))));
    }

    #[test]
    fn test_require_number() {
        let df = labelled();
        assert!(df.require_number("y").is_ok());
        assert!(matches!(df.require_number("group"), Err(Error::MissingColumn(_))));
        assert_eq!(df.value("group", 1), Some(DataValue::Text("a".into())));
    }
}
