//! Image decoding, resizing and PNG export for rasters

use crate::io::configuration::{MAX_RESIZE, MIN_RESIZE, RESIZE_STEP};
use crate::io::error::{GrainError, Result, invalid_parameter};
use crate::spatial::RasterBuffer;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Decode an image file into an RGBA8 raster
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded image is empty
pub fn load_raster(path: &Path) -> Result<RasterBuffer> {
    let img = image::open(path).map_err(|e| GrainError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    RasterBuffer::from_rgba_image(&img.to_rgba8())
}

/// Encode a raster as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(raster: &RasterBuffer, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GrainError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    raster
        .to_rgba_image()?
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| GrainError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

// Rounds half away from zero for positive values, like `Math.round`
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Validate a resize factor and snap it to the nearest `RESIZE_STEP`
///
/// # Errors
///
/// Returns `InvalidParameter` if the factor is not finite or lies outside
/// `[MIN_RESIZE, MAX_RESIZE]`
pub fn snap_resize_factor(factor: f64) -> Result<f64> {
    if !factor.is_finite() || !(MIN_RESIZE..=MAX_RESIZE).contains(&factor) {
        return Err(invalid_parameter(
            "resize",
            &factor,
            &format!("must be between {MIN_RESIZE} and {MAX_RESIZE}"),
        ));
    }

    let snapped = (factor / RESIZE_STEP).round() * RESIZE_STEP;
    // Trim float noise left by the step multiplication
    Ok(((snapped * 100.0).round() / 100.0).clamp(MIN_RESIZE, MAX_RESIZE))
}

/// Target dimensions for a resize factor, never smaller than 1x1
pub fn resized_dimensions(width: usize, height: usize, factor: f64) -> (usize, usize) {
    let scale = |extent: usize| (round_half_up(extent as f64 * factor) as usize).max(1);
    (scale(width), scale(height))
}

/// Whether a factor leaves the image at its original size
pub fn is_identity_resize(factor: f64) -> bool {
    round_half_up(factor * 100.0) as i64 == 100
}

/// Resample a raster by `factor` with a bilinear filter
///
/// # Errors
///
/// Returns an error if the raster or its resized form cannot be represented
/// as an `image` buffer
pub fn resize_raster(raster: &RasterBuffer, factor: f64) -> Result<RasterBuffer> {
    if is_identity_resize(factor) {
        return Ok(raster.clone());
    }

    let (width, height) = resized_dimensions(raster.width(), raster.height(), factor);
    let invalid = || GrainError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_overflow| invalid())?;
    let h = u32::try_from(height).map_err(|_overflow| invalid())?;

    let resized = imageops::resize(&raster.to_rgba_image()?, w, h, FilterType::Triangle);
    RasterBuffer::from_rgba_image(&resized)
}

/// Human-readable size line, e.g. `300X200` or `300X200 to 150X100`
pub fn dimension_summary(width: usize, height: usize, factor: f64) -> String {
    if is_identity_resize(factor) {
        format!("{width}X{height}")
    } else {
        let (w, h) = resized_dimensions(width, height, factor);
        format!("{width}X{height} to {w}X{h}")
    }
}
