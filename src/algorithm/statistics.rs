//! Per-cell color mean and loss measurement

use crate::spatial::RasterBuffer;
use std::ops::Range;

/// Mean color and flattening loss of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStatistics {
    /// Mean R, G, B over the cell's in-bounds pixels
    pub mean: [f64; 3],
    /// Mean absolute deviation from `mean`, averaged over the three channels
    pub loss: f64,
    /// Number of in-bounds pixels measured
    pub count: usize,
}

impl CellStatistics {
    /// Mean color converted to 8-bit channels
    pub fn mean_color(&self) -> [u8; 3] {
        self.mean.map(quantize_channel)
    }
}

/// Measure the pixels of `raster` inside `xs` x `ys`
///
/// Coordinates outside the raster are skipped. Returns `None` when the cell
/// contains no in-bounds pixel.
pub fn measure_cell(
    raster: &RasterBuffer,
    xs: &Range<usize>,
    ys: &Range<usize>,
) -> Option<CellStatistics> {
    let cell_pixels = || {
        ys.clone()
            .flat_map(move |y| xs.clone().map(move |x| (x, y)))
            .filter_map(|(x, y)| raster.pixel(x, y))
    };

    let mut totals = [0_u64; 3];
    let mut count = 0_usize;
    for pixel in cell_pixels() {
        for (total, &value) in totals.iter_mut().zip(&pixel) {
            *total += u64::from(value);
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    let mean = totals.map(|total| total as f64 / n);

    let mut deviations = [0.0_f64; 3];
    for pixel in cell_pixels() {
        for ((deviation, &value), &channel_mean) in deviations.iter_mut().zip(&pixel).zip(&mean) {
            *deviation += (f64::from(value) - channel_mean).abs();
        }
    }

    let [r, g, b] = deviations.map(|deviation| deviation / n);
    Some(CellStatistics {
        mean,
        loss: (r + g + b) / 3.0,
        count,
    })
}

/// Store a fractional channel value into a byte
///
/// Clamps to `[0, 255]` and rounds to nearest with ties to even, matching
/// the conversion performed by a canvas `Uint8ClampedArray`.
pub fn quantize_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
