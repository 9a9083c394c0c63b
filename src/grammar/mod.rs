//! Grammar of Graphics host.
//!
//! The pipeline the coords, stats and geoms of this crate plug into.
//!
//! # Components
//!
//! - **Data**: columnar frames passed between stages
//! - **Aesthetics**: column mappings and fixed visual values
//! - **Statistics**: per-group data transformations
//! - **Scales**: continuous position scales and their breaks
//! - **Coordinates**: the [`Coord`] contract and Cartesian coordinates
//! - **Geometries**: data to [`Grob`]s
//! - **Theme**: non-data appearance
//!
//! # Example
//!
//! ```rust
//! use ggalt::grammar::*;
//!
//! let plot = Plot::new()
//!     .data_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
//!     .geom(GeomPoint)
//!     .aes(Aes::new().size_value(3.0))
//!     .build()
//!     .unwrap();
//! assert_eq!(plot.layers.len(), 1);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
pub mod breaks;
mod coord;
mod data;
mod geom;
mod grob;
mod plot;
mod scale;
mod stat;
mod theme;

pub use aes::Aes;
pub use coord::{
    axis_guide, euclidean_distance, munch, AxisParams, Coord, CoordCartesian, HorizontalAxes, PanelParams,
    VerticalAxes, MUNCH_SEGMENT_LENGTH,
};
pub use data::{Column, DataFrame, DataValue};
pub use geom::{finite_points, finite_runs, Geom, GeomArea, GeomPath, GeomPoint, GeomSegment, Style, PT};
pub use grob::{Gpar, Grob, Side};
pub use plot::{BuiltPlot, Layer, Plot};
pub use scale::{expand_range, rescale, Axis, BreakInfo, Breaks, ContinuousScale, Expansion, LabelFormat};
pub use stat::{carry_group_columns, Stat, StatIdentity};
pub use theme::Theme;
