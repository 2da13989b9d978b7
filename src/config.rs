use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::{DEFAULT_DATA_URL, DataSource};
use crate::foundation::core::{Canvas, Margin};
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use crate::layout::tile::{PHI, TileKind, create_tile};
use crate::layout::treemap::TreemapLayout;
use crate::render::color::{Color, OrdinalScale, default_palette};
use crate::render::tooltip::TooltipOptions;
use crate::render::treemap::{LabelOptions, RenderOptions};

/// Chart settings. Every field is optional in JSON; missing ones take the published page's values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// URL or file path of the dataset.
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub palette: Vec<Color>,
    pub tile: TileKind,
    /// Target aspect ratio for `squarify`.
    pub squarify_ratio: f64,
    pub padding_inner: f64,
    pub padding_outer: Margin,
    /// Snap tile edges to whole pixels.
    pub round: bool,
    pub container_id: String,
    pub tooltip_id: String,
    pub stroke: String,
    pub label: LabelOptions,
    pub tooltip: TooltipOptions,
    pub title: String,
    /// Device pixels per SVG unit for PNG output.
    pub raster_scale: f32,
    /// PNG backdrop; `null` keeps it transparent.
    pub background: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_URL.to_owned(),
            width: 1100,
            height: 700,
            margin: Margin::default(),
            palette: default_palette(),
            tile: TileKind::Squarify,
            squarify_ratio: PHI,
            padding_inner: 0.0,
            padding_outer: Margin::default(),
            round: false,
            container_id: "graph".to_owned(),
            tooltip_id: "tooltip".to_owned(),
            stroke: "black".to_owned(),
            label: LabelOptions::default(),
            tooltip: TooltipOptions::default(),
            title: "Movie Sales".to_owned(),
            raster_scale: 1.0,
            background: Some(Color::rgb(0xff, 0xff, 0xff)),
        }
    }
}

impl Config {
    pub fn from_reader<R: Read>(reader: R) -> BoxofficeResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| BoxofficeError::parse(format!("parse config JSON: {e}")))
    }

    pub fn from_path(path: &Path) -> BoxofficeResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            BoxofficeError::Io(std::io::Error::new(
                e.kind(),
                format!("open config '{}': {e}", path.display()),
            ))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn validate(&self) -> BoxofficeResult<()> {
        let canvas = self.canvas()?;

        check_margin("margin", &self.margin)?;
        check_margin("padding_outer", &self.padding_outer)?;
        let inner = self.margin.inner(canvas);
        if inner.width <= 0.0 || inner.height <= 0.0 {
            return Err(BoxofficeError::validation(format!(
                "margin leaves no room on a {}x{} canvas",
                canvas.width, canvas.height
            )));
        }

        if self.palette.is_empty() {
            return Err(BoxofficeError::validation("palette must be non-empty"));
        }
        if !self.padding_inner.is_finite() || self.padding_inner < 0.0 {
            return Err(BoxofficeError::validation(
                "padding_inner must be finite and >= 0",
            ));
        }
        if !self.squarify_ratio.is_finite() || self.squarify_ratio < 1.0 {
            return Err(BoxofficeError::validation(
                "squarify_ratio must be finite and >= 1",
            ));
        }

        for (field, id) in [
            ("container_id", &self.container_id),
            ("tooltip_id", &self.tooltip_id),
        ] {
            if id.trim().is_empty() {
                return Err(BoxofficeError::validation(format!(
                    "{field} must be non-empty"
                )));
            }
        }
        if self.container_id == self.tooltip_id {
            return Err(BoxofficeError::validation(
                "container_id and tooltip_id must differ",
            ));
        }

        let opacity = self.tooltip.opacity;
        if !(opacity > 0.0 && opacity <= 1.0) {
            return Err(BoxofficeError::validation(
                "tooltip.opacity must be in (0, 1]",
            ));
        }
        if !self.tooltip.offset_x.is_finite() || !self.tooltip.offset_y.is_finite() {
            return Err(BoxofficeError::validation("tooltip offsets must be finite"));
        }
        if !self.label.line_height.is_finite() || self.label.line_height < 0.0 {
            return Err(BoxofficeError::validation(
                "label.line_height must be finite and >= 0",
            ));
        }
        if !self.label.offset_x.is_finite() || !self.label.offset_y.is_finite() {
            return Err(BoxofficeError::validation("label offsets must be finite"));
        }
        if !self.raster_scale.is_finite() || self.raster_scale <= 0.0 {
            return Err(BoxofficeError::validation("raster_scale must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> BoxofficeResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    pub fn layout(&self) -> BoxofficeResult<TreemapLayout> {
        let canvas = self.canvas()?;
        Ok(TreemapLayout::new(self.margin.inner(canvas))
            .with_tile(create_tile(self.tile, self.squarify_ratio))
            .with_padding_inner(self.padding_inner)
            .with_padding_outer(self.padding_outer)
            .with_round(self.round))
    }

    pub fn render_options(&self) -> BoxofficeResult<RenderOptions> {
        Ok(RenderOptions {
            canvas: self.canvas()?,
            margin: self.margin,
            stroke: self.stroke.clone(),
            label: self.label.clone(),
        })
    }

    /// Ordinal color scale over `domain` with this config's palette.
    pub fn color_scale<I, S>(&self, domain: I) -> BoxofficeResult<OrdinalScale>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OrdinalScale::new(domain, self.palette.clone())
    }
}

fn check_margin(field: &str, m: &Margin) -> BoxofficeResult<()> {
    for v in [m.top, m.right, m.bottom, m.left] {
        if !v.is_finite() || v < 0.0 {
            return Err(BoxofficeError::validation(format!(
                "{field} sides must be finite and >= 0"
            )));
        }
    }
    Ok(())
}
