//! Owned RGBA8 raster with validated dimensions
//!
//! Pixels are stored as an `(height, width, 4)` array in standard layout, so the
//! flat byte order is identical to an `image::RgbaImage` or a canvas buffer.

use crate::io::error::{GrainError, Result};
use image::RgbaImage;
use ndarray::Array3;
use std::collections::HashSet;

/// Channels per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// Width x height grid of RGBA8 pixels
///
/// Construction guarantees `width >= 1`, `height >= 1` and a backing
/// buffer of exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pixels: Array3<u8>,
}

fn validate_dimensions(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(GrainError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|area| area.checked_mul(CHANNELS))
        .ok_or(GrainError::InvalidDimensions { width, height })
}

impl RasterBuffer {
    /// Create an opaque black raster
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 255])
    }

    /// Create a raster where every pixel has the given color
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero
    pub fn filled(width: usize, height: usize, color: [u8; 4]) -> Result<Self> {
        validate_dimensions(width, height)?;
        let pixels = Array3::from_shape_fn((height, width, CHANNELS), |(_, _, channel)| {
            color.get(channel).copied().unwrap_or(0)
        });
        Ok(Self { pixels })
    }

    /// Wrap raw RGBA8 bytes in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero (`InvalidDimensions`)
    /// - The byte count differs from `width * height * 4` (`BufferLength`)
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = validate_dimensions(width, height)?;
        let actual = data.len();
        if actual != expected {
            return Err(GrainError::BufferLength { expected, actual });
        }

        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data)
            .map_err(|_shape_error| GrainError::BufferLength { expected, actual })?;
        Ok(Self { pixels })
    }

    /// Copy a decoded `image` buffer into a raster
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for an empty image
    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width as usize, height as usize, img.as_raw().clone())
    }

    /// Convert into an `image` buffer for encoding
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the raster is too large for `image`'s `u32` dimensions
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let (width, height) = (self.width(), self.height());
        let invalid = || GrainError::InvalidDimensions { width, height };
        let w = u32::try_from(width).map_err(|_overflow| invalid())?;
        let h = u32::try_from(height).map_err(|_overflow| invalid())?;
        RgbaImage::from_raw(w, h, self.as_raw().to_vec()).ok_or_else(invalid)
    }

    /// Raster width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Raster height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Row-major RGBA8 bytes
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_slice().unwrap_or(&[])
    }

    /// Consume the raster, returning its row-major RGBA8 bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw_vec_and_offset().0
    }

    /// Underlying `(height, width, channel)` array
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// RGBA value at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let channel = |c: usize| self.pixels.get((y, x, c)).copied();
        Some([channel(0)?, channel(1)?, channel(2)?, channel(3)?])
    }

    /// Overwrite all four channels at `(x, y)`; ignored outside the raster
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (c, value) in rgba.into_iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut((y, x, c)) {
                *slot = value;
            }
        }
    }

    /// Overwrite only the color channels at `(x, y)`, leaving alpha intact
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        for (c, value) in rgb.into_iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut((y, x, c)) {
                *slot = value;
            }
        }
    }

    /// Number of distinct RGBA colors present
    pub fn distinct_colors(&self) -> usize {
        self.as_raw()
            .chunks_exact(CHANNELS)
            .collect::<HashSet<_>>()
            .len()
    }
}
