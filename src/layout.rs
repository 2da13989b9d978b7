pub mod hierarchy;
pub mod tile;
pub mod treemap;
