//! Curve and density smoothing used by the stats and geoms.

pub mod hull;
pub mod kde;
pub mod xspline;

pub use hull::{centroid, convex_hull};
pub use kde::{bkde, bkfe, dpik, linbin, Density, Kernel, DEFAULT_GRIDSIZE};
pub use xspline::XSpline;
