//! Statistical transformations.
//!
//! A stat turns a layer's data into the data its geom draws, one group at a
//! time.

use std::fmt::Debug;

use crate::error::Result;

use super::data::{Column, DataFrame};

/// Statistical transformation contract.
pub trait Stat: Debug + Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Transform one group.
    ///
    /// # Errors
    ///
    /// Returns an error when the group cannot be summarised.
    fn compute_group(&self, data: &DataFrame) -> Result<DataFrame>;

    /// Transform a whole layer: split by `group`, compute each group, stack
    /// the results.
    ///
    /// # Errors
    ///
    /// Propagates the first group error.
    fn compute_layer(&self, data: &DataFrame) -> Result<DataFrame> {
        let groups = data
            .split_by("group")
            .iter()
            .filter(|g| g.nrow() > 0)
            .map(|g| self.compute_group(g))
            .collect::<Result<Vec<_>>>()?;
        DataFrame::concat(&groups)
    }
}

/// Leaves the data unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatIdentity;

impl Stat for StatIdentity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn compute_group(&self, data: &DataFrame) -> Result<DataFrame> {
        Ok(data.clone())
    }

    fn compute_layer(&self, data: &DataFrame) -> Result<DataFrame> {
        Ok(data.clone())
    }
}

/// Append the first-row value of every column of `group` that `computed`
/// lacks, repeated for each computed row.
///
/// # Errors
///
/// Propagates column insertion failures.
pub fn carry_group_columns(group: &DataFrame, mut computed: DataFrame) -> Result<DataFrame> {
    let n = computed.nrow();
    for (name, column) in group.iter() {
        if computed.has_column(name) {
            continue;
        }
        if let Some(first) = column.get(0) {
            computed.insert(name, Column::repeat(&first, n))?;
        }
    }
    Ok(computed)
}
