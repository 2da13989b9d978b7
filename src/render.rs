pub mod color;
pub mod format;
pub mod label;
pub mod page;
pub mod raster;
pub mod tooltip;
pub mod treemap;
