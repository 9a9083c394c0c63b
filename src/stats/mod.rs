//! Statistical transformations added on top of the grammar host.

mod bkde;
mod xspline;

pub use bkde::{BkdeParams, StatBkde};
pub use xspline::StatXspline;
