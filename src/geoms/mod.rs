//! Geometries added on top of the grammar host.

mod bkde;
mod encircle;
mod lollipop;
mod xspline;

pub use bkde::{geom_bkde, GeomBkde};
pub use encircle::GeomEncircle;
pub use lollipop::{GeomLollipop, POINT_SIZE_RATIO};
pub use xspline::geom_xspline;
