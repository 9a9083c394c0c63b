//! Binned kernel density estimate per group.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::geometry::Range;
use crate::grammar::{carry_group_columns, DataFrame, Stat};
use crate::smooth::{bkde, dpik, Kernel, DEFAULT_GRIDSIZE};

/// Density estimation settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct BkdeParams {
    /// Smoothing kernel.
    #[cfg_attr(feature = "config", serde(default))]
    pub kernel: Kernel,

    /// Bandwidth; chosen by the direct plug-in rule when absent.
    #[cfg_attr(feature = "config", serde(default))]
    pub bandwidth: Option<f64>,

    /// Number of grid points.
    #[cfg_attr(feature = "config", serde(default = "default_gridsize"))]
    pub gridsize: usize,

    /// Estimation range; the group's data range when absent.
    #[cfg_attr(feature = "config", serde(default))]
    pub range_x: Option<(f64, f64)>,

    /// Drop observations outside the estimation range.
    #[cfg_attr(feature = "config", serde(default = "default_truncate"))]
    pub truncate: bool,
}

fn default_gridsize() -> usize {
    DEFAULT_GRIDSIZE
}
fn default_truncate() -> bool {
    true
}

impl Default for BkdeParams {
    fn default() -> Self {
        Self {
            kernel: Kernel::default(),
            bandwidth: None,
            gridsize: default_gridsize(),
            range_x: None,
            truncate: default_truncate(),
        }
    }
}

/// Density of `x` on a grid, one curve per group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatBkde {
    params: BkdeParams,
}

impl StatBkde {
    /// Normal kernel, plug-in bandwidth.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `params`.
    #[must_use]
    pub fn with_params(params: BkdeParams) -> Self {
        Self { params }
    }

    /// Set the kernel.
    #[must_use]
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.params.kernel = kernel;
        self
    }

    /// Fix the bandwidth.
    #[must_use]
    pub fn bandwidth(mut self, bandwidth: f64) -> Self {
        self.params.bandwidth = Some(bandwidth);
        self
    }

    /// Set the grid size.
    #[must_use]
    pub fn gridsize(mut self, gridsize: usize) -> Self {
        self.params.gridsize = gridsize;
        self
    }

    /// Fix the estimation range.
    #[must_use]
    pub fn range_x(mut self, min: f64, max: f64) -> Self {
        self.params.range_x = Some((min, max));
        self
    }

    /// Settings in use.
    #[must_use]
    pub fn params(&self) -> &BkdeParams {
        &self.params
    }
}

impl Stat for StatBkde {
    fn name(&self) -> &'static str {
        "bkde"
    }

    fn compute_group(&self, data: &DataFrame) -> Result<DataFrame> {
        let xs = data.require_number("x")?;
        let p = &self.params;
        let range = p.range_x.map(Range::from).or_else(|| Range::of_finite(xs));

        let bandwidth = match p.bandwidth {
            Some(h) => h,
            None => {
                let h = dpik(xs, p.gridsize, range, p.truncate)?;
                info!(bandwidth = h, "using plug-in bandwidth");
                h
            }
        };

        let density = bkde(xs, p.kernel, bandwidth, p.gridsize, range, p.truncate)?;
        carry_group_columns(data, DataFrame::from_xy(&density.x, &density.y))
    }
}
