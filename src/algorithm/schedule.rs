//! Cell-size schedule and centered grid geometry for each layer
//!
//! Cell sizes double from 2 up to the first power of two covering the
//! larger image dimension. At every size the cell grid is centered over the
//! image, so edge cells are clipped symmetrically instead of only on the
//! right and bottom.

use std::ops::Range;

/// Smallest `k` such that `2^k >= max_dimension`
pub const fn layer_count(max_dimension: usize) -> u32 {
    match max_dimension.checked_next_power_of_two() {
        Some(power) => power.trailing_zeros(),
        None => usize::BITS,
    }
}

/// Ascending cell sizes `[2, 4, ..., 2^k]` for an image of the given dimensions
///
/// A size of 1 is never scheduled. Images whose larger side is 1 still get a
/// single layer of size 2.
pub fn cell_sizes(width: usize, height: usize) -> Vec<usize> {
    let count = layer_count(width.max(height)).max(1);
    (1..=count)
        .filter_map(|exponent| 1_usize.checked_shl(exponent))
        .collect()
}

/// Cell grid layout for one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerGeometry {
    /// Side length of a square cell
    pub cell_size: usize,
    /// Number of cell columns, `ceil(width / cell_size)`
    pub cols: usize,
    /// Number of cell rows, `ceil(height / cell_size)`
    pub rows: usize,
    /// Horizontal shift that centers the grid over the image
    pub x_offset: usize,
    /// Vertical shift that centers the grid over the image
    pub y_offset: usize,
    width: usize,
    height: usize,
}

impl LayerGeometry {
    /// Lay out a centered grid of `cell_size` cells over a `width` x `height` image
    ///
    /// A zero `cell_size` is treated as 1.
    pub const fn new(width: usize, height: usize, cell_size: usize) -> Self {
        let cell_size = if cell_size == 0 { 1 } else { cell_size };
        let cols = width.div_ceil(cell_size);
        let rows = height.div_ceil(cell_size);

        Self {
            cell_size,
            cols,
            rows,
            x_offset: (cols * cell_size - width) / 2,
            y_offset: (rows * cell_size - height) / 2,
            width,
            height,
        }
    }

    /// Total number of cells in the grid
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// In-bounds pixel columns covered by cell column `col`
    pub fn column_span(&self, col: usize) -> Range<usize> {
        axis_span(col, self.cell_size, self.x_offset, self.width)
    }

    /// In-bounds pixel rows covered by cell row `row`
    pub fn row_span(&self, row: usize) -> Range<usize> {
        axis_span(row, self.cell_size, self.y_offset, self.height)
    }
}

// Grid coordinate `index * cell_size - offset` mapped to image space, clipped to [0, extent)
fn axis_span(index: usize, cell_size: usize, offset: usize, extent: usize) -> Range<usize> {
    let grid_start = index.saturating_mul(cell_size);
    let start = grid_start.saturating_sub(offset).min(extent);
    let end = grid_start
        .saturating_add(cell_size)
        .saturating_sub(offset)
        .min(extent);
    start..end.max(start)
}
