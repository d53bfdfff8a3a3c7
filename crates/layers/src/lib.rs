pub mod layer;
pub mod markers;
pub mod radius;
pub mod raster;
pub mod symbology;
pub mod tooltip;
pub mod vector;

pub use layer::*;
