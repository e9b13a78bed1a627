//! Progressive, threshold-gated pixelation of raster images
//!
//! Square cells of size 2, 4, 8, ... are laid over the image, centered, one
//! layer at a time. A cell is flattened to its mean color when the mean
//! absolute deviation of its pixels stays within the threshold, so flat
//! regions merge into large blocks while detailed regions keep fine cells.

#![forbid(unsafe_code)]

/// Pixelation engine: schedule, cell statistics and layer driver
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Raster storage
pub mod spatial;

pub use algorithm::{LayerSummary, PixelateConfig, Pixelator, Threshold, pixelate, pixelate_rgba};
pub use io::error::{GrainError, Result};
pub use spatial::RasterBuffer;
