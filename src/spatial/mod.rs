//! Pixel storage shared by the engine and the file adapters

/// Owned RGBA8 raster buffer
pub mod raster;

pub use raster::RasterBuffer;
