//! Plot builder and build pipeline.
//!
//! Combines data, layers, scales, a coord and a theme into drawable grobs:
//! aesthetics → stat → geom setup → scale training → coord training → draw.

use tracing::debug;

use crate::error::{Error, Result};

use super::aes::Aes;
use super::coord::{Coord, CoordCartesian, HorizontalAxes, PanelParams, VerticalAxes};
use super::data::DataFrame;
use super::geom::Geom;
use super::grob::Grob;
use super::scale::ContinuousScale;
use super::stat::{Stat, StatIdentity};
use super::theme::Theme;

/// A layer in the plot.
#[derive(Debug)]
pub struct Layer {
    geom: Box<dyn Geom>,
    stat: Box<dyn Stat>,
    data: Option<DataFrame>,
    aes: Aes,
}

impl Layer {
    /// Create a layer drawing `geom` with the identity stat.
    #[must_use]
    pub fn new(geom: impl Geom + 'static) -> Self {
        Self { geom: Box::new(geom), stat: Box::new(StatIdentity), data: None, aes: Aes::new() }
    }

    /// Set the stat.
    #[must_use]
    pub fn stat(mut self, stat: impl Stat + 'static) -> Self {
        self.stat = Box::new(stat);
        self
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = Some(data);
        self
    }

    /// Set layer aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }
}

/// Grammar of Graphics plot builder.
#[derive(Debug)]
pub struct Plot<C: Coord = CoordCartesian> {
    data: DataFrame,
    aes: Aes,
    layers: Vec<Layer>,
    coord: C,
    theme: Theme,
    scale_x: ContinuousScale,
    scale_y: ContinuousScale,
    width: u32,
    height: u32,
    title: Option<String>,
}

impl Default for Plot<CoordCartesian> {
    fn default() -> Self {
        Self::new()
    }
}

impl Plot<CoordCartesian> {
    /// Create a new plot builder with Cartesian coordinates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DataFrame::new(),
            aes: Aes::new(),
            layers: Vec::new(),
            coord: CoordCartesian::new(),
            theme: Theme::grey(),
            scale_x: ContinuousScale::x(),
            scale_y: ContinuousScale::y(),
            width: 800,
            height: 600,
            title: None,
        }
    }
}

impl<C: Coord> Plot<C> {
    /// Set the data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = data;
        self
    }

    /// Convenience: set x and y data directly.
    #[must_use]
    pub fn data_xy(mut self, x: &[f64], y: &[f64]) -> Self {
        self.data = DataFrame::from_xy(x, y);
        self
    }

    /// Set global aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// Add a geometry with the identity stat.
    #[must_use]
    pub fn geom(mut self, geom: impl Geom + 'static) -> Self {
        self.layers.push(Layer::new(geom));
        self
    }

    /// Add a layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Replace the coordinate system.
    #[must_use]
    pub fn coord<D: Coord>(self, coord: D) -> Plot<D> {
        Plot {
            data: self.data,
            aes: self.aes,
            layers: self.layers,
            coord,
            theme: self.theme,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            width: self.width,
            height: self.height,
            title: self.title,
        }
    }

    /// Set theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the x scale (breaks, labels, limits).
    #[must_use]
    pub fn scale_x(mut self, scale: ContinuousScale) -> Self {
        self.scale_x = scale;
        self
    }

    /// Replace the y scale.
    #[must_use]
    pub fn scale_y(mut self, scale: ContinuousScale) -> Self {
        self.scale_y = scale;
        self
    }

    /// Set dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Run the pipeline and produce drawable grobs.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no layers, a mapped or required column
    /// is missing, a stat fails, or the coord cannot be trained.
    pub fn build(self) -> Result<BuiltPlot> {
        if self.layers.is_empty() {
            return Err(Error::InvalidParameter("no layers to draw".into()));
        }

        let mut prepared = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let aes = self.aes.merge(&layer.aes);
            let data = aes.map_data(layer.data.as_ref().unwrap_or(&self.data))?;
            let computed = layer.stat.compute_layer(&data)?;
            let computed = layer.geom.setup_data(computed)?;
            if computed.nrow() > 0 {
                if let Some(missing) = layer.geom.required().iter().find(|c| !computed.has_column(c)) {
                    return Err(Error::MissingColumn(format!("{missing} (required by geom_{})", layer.geom.name())));
                }
            }
            debug!(
                stat = layer.stat.name(),
                geom = layer.geom.name(),
                rows_in = data.nrow(),
                rows_out = computed.nrow(),
                "prepared layer"
            );
            prepared.push((computed, aes));
        }

        let mut scale_x = self.scale_x;
        let mut scale_y = self.scale_y;
        for (data, _) in &prepared {
            scale_x.train(data);
            scale_y.train(data);
        }

        let panel = self.coord.train(&scale_x, &scale_y)?;
        let background = self.coord.render_bg(&panel, &self.theme)?;

        let mut grobs = Vec::with_capacity(prepared.len());
        for (layer, (data, aes)) in self.layers.iter().zip(&prepared) {
            grobs.push(layer.geom.draw_panel(data, &panel, &self.coord, aes)?);
        }

        let axis_h = self.coord.render_axis_h(&panel, &self.theme)?;
        let axis_v = self.coord.render_axis_v(&panel, &self.theme)?;
        let aspect = self.coord.aspect(&panel);

        Ok(BuiltPlot {
            aspect,
            panel,
            background,
            layers: grobs,
            axis_h,
            axis_v,
            theme: self.theme,
            width: self.width,
            height: self.height,
            title: self.title,
        })
    }
}

/// A built plot: panel parameters plus every grob, ready for encoding.
#[derive(Debug, Clone)]
pub struct BuiltPlot {
    /// Panel parameters from the coord's training pass.
    pub panel: PanelParams,
    /// Height to width ratio the panel is drawn at, when the coord fixes one.
    pub aspect: Option<f64>,
    /// Background and grid lines.
    pub background: Grob,
    /// One grob per layer, in layer order.
    pub layers: Vec<Grob>,
    /// Top/bottom guides.
    pub axis_h: HorizontalAxes,
    /// Left/right guides.
    pub axis_v: VerticalAxes,
    /// Theme used to draw.
    pub theme: Theme,
    /// Width in device units.
    pub width: u32,
    /// Height in device units.
    pub height: u32,
    /// Plot title.
    pub title: Option<String>,
}
