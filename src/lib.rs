//! # ggalt
//!
//! Extra coordinate systems, geoms and stats for a Rust grammar of graphics.
//!
//! ## Features
//!
//! - **Map projections**: [`coord_proj::CoordProj`] projects lon/lat data
//!   through any PROJ string, with native Robinson, Mollweide, sinusoidal,
//!   equirectangular and Mercator and a [`proj4rs`] fallback
//! - **Geoms**: lollipops, x-spline paths, encircling outlines and filled
//!   density curves
//! - **Stats**: binned kernel density estimation with a plug-in bandwidth,
//!   x-spline smoothing
//! - **Output**: vector SVG
//!
//! ## Quick Start
//!
//! ```rust
//! use ggalt::prelude::*;
//!
//! let lon = [-120.0, -60.0, 0.0, 60.0, 120.0];
//! let lat = [40.0, -20.0, 0.0, 35.0, -45.0];
//! let plot = Plot::new()
//!     .data_xy(&lon, &lat)
//!     .geom(GeomPoint)
//!     .coord(CoordProj::robinson()?)
//!     .build()?;
//! assert!(plot.to_svg().contains("<circle"));
//! # Ok::<(), ggalt::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): serde + YAML loading of [`coord_proj::CoordProjConfig`]
//!   and [`stats::BkdeParams`]
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Robinson, A. H. (1974). "A New Map Projection: Its Development and
//!   Characteristics." International Yearbook of Cartography.
//! - Blanc, C. & Schlick, C. (1995). "X-Splines: A Spline Model Designed for
//!   the End-User." SIGGRAPH '95.
//! - Wand, M. P. (1994). "Fast Computation of Multivariate Kernel Estimators."
//!   Journal of Computational and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Geometric primitives (points, ranges, bounds).
pub mod geometry;

/// Cartographic projections.
pub mod proj;

// ============================================================================
// Grammar Modules
// ============================================================================

pub mod grammar;

/// Map-projection coordinate system.
pub mod coord_proj;

/// Smoothing and estimation primitives.
pub mod smooth;

/// Stats built on [`smooth`].
pub mod stats;

pub mod geoms;

/// Output encoders (SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for ggalt operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use ggalt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::coord_proj::{CoordProj, CoordProjConfig, HorizontalPosition, VerticalPosition};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Point, Range};
    pub use crate::geoms::{geom_bkde, geom_xspline, GeomBkde, GeomEncircle, GeomLollipop};
    pub use crate::grammar::{
        Aes, BuiltPlot, Coord, CoordCartesian, DataFrame, Geom, GeomArea, GeomPath, GeomPoint, GeomSegment, Layer,
        Plot, Stat, Theme,
    };
    pub use crate::output::SvgEncoder;
    pub use crate::proj::Projector;
    pub use crate::smooth::{Kernel, XSpline};
    pub use crate::stats::{BkdeParams, StatBkde, StatXspline};
}
