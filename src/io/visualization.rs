//! Layer-by-layer frame capture and GIF export

use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{GrainError, Result, invalid_parameter};
use crate::spatial::RasterBuffer;
use image::{Delay, Frame};
use std::path::Path;

/// Snapshot of the raster taken during a pixelation run
#[derive(Debug, Clone)]
pub struct LayerFrame {
    /// Cell size of the layer just applied (`None` for the untouched input)
    pub cell_size: Option<usize>,
    /// Raster contents at capture time
    pub raster: RasterBuffer,
}

/// Records the raster after every layer so the progression can be replayed
#[derive(Debug, Clone, Default)]
pub struct LayerCapture {
    frames: Vec<LayerFrame>,
}

impl LayerCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Store a copy of the raster
    pub fn record(&mut self, cell_size: Option<usize>, raster: &RasterBuffer) {
        self.frames.push(LayerFrame {
            cell_size,
            raster: raster.clone(),
        });
    }

    /// Drop all recorded frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Recorded frames in capture order
    pub fn frames(&self) -> &[LayerFrame] {
        &self.frames
    }

    /// Number of recorded frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Delays below what viewers reliably honour are raised to
    /// `VIEWER_MIN_FRAME_DELAY_MS`. The final frame is held `FINAL_FRAME_HOLD`
    /// times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "frames",
                &0,
                &"no layers captured for visualization",
            ));
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let last_index = self.frames.len() - 1;
        let mut frames = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.iter().enumerate() {
            let frame_delay = if index == last_index {
                delay_ms.saturating_mul(FINAL_FRAME_HOLD)
            } else {
                delay_ms
            };
            frames.push(Frame::from_parts(
                frame.raster.to_rgba_image()?,
                0,
                0,
                Delay::from_numer_denom_ms(frame_delay, 1),
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GrainError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| GrainError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| GrainError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
