//! The pixelation engine
//!
//! Layers of progressively larger cells are applied one on top of another.
//! Within a layer every cell whose color loss stays under the threshold is
//! flattened to its mean color.

/// Layer driver and public entry points
pub mod executor;
/// Cell-size schedule and grid geometry
pub mod schedule;
/// Per-cell mean and loss measurement
pub mod statistics;
/// Validated flattening threshold
pub mod threshold;

pub use executor::{LayerSummary, PixelateConfig, Pixelator, pixelate, pixelate_rgba};
pub use threshold::Threshold;
