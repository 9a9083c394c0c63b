//! Output encoders.

mod svg;

pub use svg::{SvgElement, SvgEncoder, TextAnchor};

use std::path::Path;

use crate::error::Result;
use crate::grammar::BuiltPlot;

impl BuiltPlot {
    /// Render as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        SvgEncoder::from_plot(self).render()
    }

    /// Write as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be written.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        SvgEncoder::from_plot(self).write_to_file(path)
    }
}
