//! Boxoffice draws hierarchical revenue data as a squarified treemap.
//!
//! The pipeline is:
//!
//! - Load and validate a [`DataNode`] tree from a [`DataSource`]
//! - Build a [`Hierarchy`] and lay it out with a [`LayoutEngine`] such as [`TreemapLayout`]
//! - Draw the leaves onto a [`Page`] with [`render_treemap`], one tile and label per leaf
//! - Drive the shared [`Tooltip`] with pointer events, or write the page as SVG, HTML or PNG
//!
//! [`render_chart`] and [`run`] wire these steps together from a [`Config`].
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod data;
pub mod layout;
pub mod pipeline;
pub mod render;

pub use crate::foundation::core::{Canvas, Margin, Point, Rect, Size, fmt_number};
pub use crate::foundation::error::{BoxofficeError, BoxofficeResult};

pub use crate::config::Config;
pub use crate::data::loader::{
    DEFAULT_DATA_URL, DataSource, fetch_json, fetch_text, load_dataset,
};
pub use crate::data::model::{DataNode, DataValue};
pub use crate::layout::hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use crate::layout::tile::{
    Binary, Dice, PHI, Slice, SliceDice, Squarify, Tile, TileKind, create_tile,
};
pub use crate::layout::treemap::{LayoutEngine, TreemapLayout};
pub use crate::pipeline::{
    CategoryReport, Chart, ChartReport, HoverReport, OutputFormat, TileReport, render_chart, run,
};
pub use crate::render::color::{Color, OrdinalScale, default_palette};
pub use crate::render::format::{format_currency, group_thousands};
pub use crate::render::label::split_name;
pub use crate::render::page::{ElementId, Page};
pub use crate::render::raster::{RasterImage, rasterize_svg};
pub use crate::render::tooltip::{Tooltip, TooltipContent, TooltipOptions, TooltipState};
pub use crate::render::treemap::{
    LabelOptions, PointerEvent, RenderOptions, RenderedTreemap, TileHandle, TileId, render_treemap,
};
