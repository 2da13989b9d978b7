use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::data::loader::load_dataset;
use crate::data::model::DataNode;
use crate::foundation::core::Point;
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use crate::layout::hierarchy::Hierarchy;
use crate::layout::treemap::LayoutEngine;
use crate::render::color::{Color, OrdinalScale};
use crate::render::page::Page;
use crate::render::raster::{RasterImage, rasterize_svg};
use crate::render::tooltip::{Tooltip, TooltipState};
use crate::render::treemap::{PointerEvent, RenderedTreemap, TileId, render_treemap};

/// A rendered chart: the page, the drawn treemap and its tooltip.
#[derive(Clone, Debug)]
pub struct Chart {
    page: Page,
    treemap: RenderedTreemap,
    tooltip: Tooltip,
    scale: OrdinalScale,
    title: String,
    raster_scale: f32,
    background: Option<Color>,
}

/// Output file kinds, picked by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Html,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> BoxofficeResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("html" | "htm") => Ok(Self::Html),
            Some("png") => Ok(Self::Png),
            _ => Err(BoxofficeError::validation(format!(
                "cannot tell output format of '{}' (expected .svg, .html or .png)",
                path.display()
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartReport {
    pub width: u32,
    pub height: u32,
    pub categories: Vec<CategoryReport>,
    pub tiles: Vec<TileReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryReport {
    pub name: String,
    pub color: Color,
}

/// One drawn tile, read back from the page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileReport {
    pub name: String,
    pub category: Option<String>,
    pub value: Option<String>,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill: Color,
    pub fragments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HoverReport {
    pub x: f64,
    pub y: f64,
    /// Index of the tile under the pointer, in drawing order.
    pub tile: Option<usize>,
    pub name: Option<String>,
    pub tooltip: TooltipState,
}

/// Lay out and draw `dataset` onto a fresh page.
pub fn render_chart(dataset: &DataNode, cfg: &Config) -> BoxofficeResult<Chart> {
    dataset.validate()?;
    draw_chart(dataset, cfg)
}

/// Load the configured dataset and render it.
pub fn run(cfg: &Config) -> BoxofficeResult<Chart> {
    let dataset = load_dataset(&cfg.data_source())?;
    draw_chart(&dataset, cfg)
}

/// Render a dataset that has already been validated.
#[tracing::instrument(skip_all, fields(root = %dataset.name))]
fn draw_chart(dataset: &DataNode, cfg: &Config) -> BoxofficeResult<Chart> {
    cfg.validate()?;

    let mut h = Hierarchy::prepare(dataset);
    cfg.layout()?.layout(&mut h)?;

    let mut page = Page::with_container(&cfg.container_id);
    let container = page
        .find_by_id(&cfg.container_id)
        .ok_or_else(|| BoxofficeError::render("container missing from fresh page"))?;
    let tooltip = Tooltip::attach(&mut page, &cfg.tooltip_id, cfg.tooltip);
    let mut scale = cfg.color_scale(dataset.category_names())?;
    let treemap = render_treemap(
        &mut page,
        container,
        &h,
        &mut scale,
        &cfg.render_options()?,
    )?;
    tracing::debug!(tiles = treemap.tiles().len(), "chart rendered");

    Ok(Chart {
        page,
        treemap,
        tooltip,
        scale,
        title: cfg.title.clone(),
        raster_scale: cfg.raster_scale,
        background: cfg.background,
    })
}

impl Chart {
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn treemap(&self) -> &RenderedTreemap {
        &self.treemap
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn scale(&self) -> &OrdinalScale {
        &self.scale
    }

    pub fn to_svg(&self) -> BoxofficeResult<String> {
        self.page
            .to_svg()
            .ok_or_else(|| BoxofficeError::render("page has no svg element"))
    }

    pub fn to_html(&self) -> String {
        self.page.to_html(&self.title)
    }

    pub fn to_png(&self) -> BoxofficeResult<RasterImage> {
        let svg = self.to_svg()?;
        let bg = self.background.map(|c| [c.r, c.g, c.b, 0xff]);
        rasterize_svg(&svg, self.raster_scale, bg)
    }

    /// Write the chart to `path` in the format its extension names.
    #[tracing::instrument(skip(self))]
    pub fn write(&self, path: &Path) -> BoxofficeResult<OutputFormat> {
        let format = OutputFormat::from_path(path)?;
        match format {
            OutputFormat::Svg => std::fs::write(path, self.to_svg()?)?,
            OutputFormat::Html => std::fs::write(path, self.to_html())?,
            OutputFormat::Png => self.to_png()?.save_png(path)?,
        }
        Ok(format)
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> BoxofficeResult<()> {
        self.treemap.dispatch(&mut self.page, &self.tooltip, event)
    }

    /// Move the pointer to `at` and report what the tooltip shows.
    pub fn hover(&mut self, at: Point) -> HoverReport {
        let tile = self.treemap.hover(&mut self.page, &self.tooltip, at);
        HoverReport {
            x: at.x,
            y: at.y,
            tile: tile.map(TileId::index),
            name: tile
                .and_then(|t| self.treemap.tile(t))
                .map(|t| t.tooltip.name.clone()),
            tooltip: self.tooltip.state(&self.page),
        }
    }

    pub fn inspect(&self) -> ChartReport {
        let svg = self.treemap.svg();
        let dim = |name: &str| {
            self.page
                .attr(svg, name)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0)
        };
        let tiles = self
            .treemap
            .tiles()
            .iter()
            .map(|t| {
                let attr = |name: &str| self.page.attr(t.rect, name).map(str::to_owned);
                TileReport {
                    name: attr("data-name").unwrap_or_default(),
                    category: attr("data-category"),
                    value: attr("data-value"),
                    x0: t.bounds.x0,
                    y0: t.bounds.y0,
                    x1: t.bounds.x1,
                    y1: t.bounds.y1,
                    fill: t.fill,
                    fragments: t.fragments.clone(),
                }
            })
            .collect();
        let categories = self
            .scale
            .domain()
            .iter()
            .filter_map(|name| {
                self.scale.get(name).map(|color| CategoryReport {
                    name: name.clone(),
                    color,
                })
            })
            .collect();
        ChartReport {
            width: dim("width"),
            height: dim("height"),
            categories,
            tiles,
        }
    }

    /// Remove the drawing and hand back the page with only the container and tooltip left.
    pub fn dispose(self) -> Page {
        let mut page = self.page;
        self.treemap.dispose(&mut page);
        page
    }
}
