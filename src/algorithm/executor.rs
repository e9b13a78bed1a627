//! Layered pixelation driver
//!
//! Each layer is processed in two phases. Every cell is first evaluated
//! against an immutable borrow of the current raster, producing a list of
//! flattening decisions; the decisions are then committed through a mutable
//! borrow. Cells of one layer never overlap, so evaluation may run across
//! threads while layers stay strictly sequential.

use crate::algorithm::schedule::{LayerGeometry, cell_sizes};
use crate::algorithm::statistics::measure_cell;
use crate::algorithm::threshold::Threshold;
use crate::io::configuration::DEFAULT_THRESHOLD;
use crate::io::error::Result;
use crate::io::visualization::LayerCapture;
use crate::spatial::RasterBuffer;
use log::debug;
use rayon::prelude::*;
use std::ops::Range;

/// Outcome of a single layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSummary {
    /// Cell size of the layer
    pub cell_size: usize,
    /// Number of cells in the layer's grid
    pub cells: usize,
    /// Number of cells flattened to their mean color
    pub flattened: usize,
}

/// Pending overwrite of one cell with its mean color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenDecision {
    /// Pixel columns to overwrite
    pub xs: Range<usize>,
    /// Pixel rows to overwrite
    pub ys: Range<usize>,
    /// Mean color written into R, G, B
    pub color: [u8; 3],
}

/// Engine settings supplied explicitly per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelateConfig {
    /// Maximum loss for a cell to be flattened
    pub threshold: Threshold,
    /// Evaluate the cells of each layer on the rayon thread pool
    pub parallel: bool,
}

impl Default for PixelateConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::from(DEFAULT_THRESHOLD),
            parallel: true,
        }
    }
}

fn evaluate_row(
    raster: &RasterBuffer,
    geometry: &LayerGeometry,
    threshold: Threshold,
    row: usize,
) -> Vec<FlattenDecision> {
    let ys = geometry.row_span(row);
    (0..geometry.cols)
        .filter_map(|col| {
            let xs = geometry.column_span(col);
            let stats = measure_cell(raster, &xs, &ys)?;
            threshold.admits(stats.loss).then(|| FlattenDecision {
                xs,
                ys: ys.clone(),
                color: stats.mean_color(),
            })
        })
        .collect()
}

/// Decide which cells of one layer get flattened
///
/// Reads `raster` only. Cells without in-bounds pixels are skipped.
pub fn evaluate_layer(
    raster: &RasterBuffer,
    geometry: &LayerGeometry,
    threshold: Threshold,
    parallel: bool,
) -> Vec<FlattenDecision> {
    if parallel {
        (0..geometry.rows)
            .into_par_iter()
            .flat_map_iter(|row| evaluate_row(raster, geometry, threshold, row))
            .collect()
    } else {
        (0..geometry.rows)
            .flat_map(|row| evaluate_row(raster, geometry, threshold, row))
            .collect()
    }
}

/// Write flattening decisions into R, G, B; alpha is left untouched
pub fn commit_layer(raster: &mut RasterBuffer, decisions: &[FlattenDecision]) {
    for decision in decisions {
        for y in decision.ys.clone() {
            for x in decision.xs.clone() {
                raster.set_rgb(x, y, decision.color);
            }
        }
    }
}

/// Apply one full layer of the given cell size
pub fn apply_layer(
    raster: &mut RasterBuffer,
    cell_size: usize,
    threshold: Threshold,
    parallel: bool,
) -> LayerSummary {
    let geometry = LayerGeometry::new(raster.width(), raster.height(), cell_size);
    let decisions = evaluate_layer(raster, &geometry, threshold, parallel);
    commit_layer(raster, &decisions);

    LayerSummary {
        cell_size: geometry.cell_size,
        cells: geometry.cell_count(),
        flattened: decisions.len(),
    }
}

/// Runs the layer schedule over a raster, optionally capturing every layer
pub struct Pixelator {
    config: PixelateConfig,
    capture: Option<LayerCapture>,
}

impl Pixelator {
    /// Create a pixelator with the given settings
    pub const fn new(config: PixelateConfig) -> Self {
        Self {
            config,
            capture: None,
        }
    }

    /// Record the input and the result of every layer on the next run
    pub fn enable_capture(&mut self) {
        self.capture = Some(LayerCapture::new());
    }

    /// Captured layer frames, if capture was enabled
    pub const fn capture(&self) -> Option<&LayerCapture> {
        self.capture.as_ref()
    }

    /// Pixelate `raster` in place
    ///
    /// `on_layer` is called after each layer with the 1-based layer number.
    pub fn run<F>(&mut self, raster: &mut RasterBuffer, mut on_layer: F) -> Vec<LayerSummary>
    where
        F: FnMut(usize, &LayerSummary),
    {
        let schedule = cell_sizes(raster.width(), raster.height());
        debug!(
            "pixelating {}x{} at threshold {} over {} layers",
            raster.width(),
            raster.height(),
            self.config.threshold,
            schedule.len()
        );

        if let Some(capture) = self.capture.as_mut() {
            capture.clear();
            capture.record(None, raster);
        }

        let mut summaries = Vec::with_capacity(schedule.len());
        for (index, &cell_size) in schedule.iter().enumerate() {
            let summary = apply_layer(
                raster,
                cell_size,
                self.config.threshold,
                self.config.parallel,
            );
            debug!(
                "layer {}: cell size {}, flattened {}/{} cells",
                index + 1,
                summary.cell_size,
                summary.flattened,
                summary.cells
            );

            if let Some(capture) = self.capture.as_mut() {
                capture.record(Some(cell_size), raster);
            }
            on_layer(index + 1, &summary);
            summaries.push(summary);
        }

        summaries
    }
}

/// Pixelate `raster` in place with the default parallel evaluation
pub fn pixelate(raster: &mut RasterBuffer, threshold: Threshold) -> Vec<LayerSummary> {
    Pixelator::new(PixelateConfig {
        threshold,
        parallel: true,
    })
    .run(raster, |_, _| {})
}

/// Pixelate a caller-owned RGBA8 byte buffer in place
///
/// All arguments are validated before any byte is written.
///
/// # Errors
///
/// Returns an error if:
/// - `width` or `height` is zero (`InvalidDimensions`)
/// - `threshold` is negative (`InvalidThreshold`)
/// - `data` is not `width * height * 4` bytes long (`BufferLength`)
pub fn pixelate_rgba(
    width: usize,
    height: usize,
    data: &mut [u8],
    threshold: i64,
) -> Result<Vec<LayerSummary>> {
    let mut raster = RasterBuffer::from_raw(width, height, data.to_vec())?;
    let threshold = Threshold::new(threshold)?;

    let summaries = pixelate(&mut raster, threshold);
    data.copy_from_slice(raster.as_raw());
    Ok(summaries)
}
