//! Density curves from binned kernel density estimates.

use crate::error::Result;
use crate::grammar::{Aes, Coord, DataFrame, Geom, GeomArea, GeomPath, Grob, Layer, PanelParams};
use crate::stats::{BkdeParams, StatBkde};

/// Area under a density curve with its outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomBkde;

impl Geom for GeomBkde {
    fn name(&self) -> &'static str {
        "bkde"
    }

    fn setup_data(&self, data: DataFrame) -> Result<DataFrame> {
        GeomArea.setup_data(data)
    }

    fn draw_panel(&self, data: &DataFrame, panel: &PanelParams, coord: &dyn Coord, aes: &Aes) -> Result<Grob> {
        let area = GeomArea.draw_panel(data, panel, coord, aes)?;
        let outline = GeomPath.draw_panel(data, panel, coord, aes)?;
        if area.is_null() && outline.is_null() {
            return Ok(Grob::Null);
        }
        Ok(Grob::tree("bkde", vec![area, outline]))
    }
}

/// A density layer: [`StatBkde`] drawn with [`GeomBkde`].
#[must_use]
pub fn geom_bkde(params: BkdeParams) -> Layer {
    Layer::new(GeomBkde).stat(StatBkde::with_params(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Plot;

    #[test]
    fn test_density_layer() {
        let xs: Vec<f64> = (0..100).map(|i| (f64::from(i) * 0.7).sin() * 3.0).collect();
        let params = BkdeParams { bandwidth: Some(0.4), gridsize: 64, ..BkdeParams::default() };
        let built = Plot::new().data_xy(&xs, &vec![0.0; xs.len()]).layer(geom_bkde(params)).build().unwrap();
        let grob = &built.layers[0];
        assert_eq!(grob.name(), Some("bkde"));
        let leaves = grob.leaves();
        assert!(matches!(leaves[0], Grob::Polygon { points, .. } if points.len() == 128));
        assert!(matches!(leaves[1], Grob::Polyline { lines, .. } if lines[0].len() == 64));
        // baseline is part of the trained range
        assert!(built.panel.y.range.contains(0.0));
    }
}
