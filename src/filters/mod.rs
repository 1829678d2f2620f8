//! Filter kernels over [`PixelGrid`].
//!
//! ## Supported Filters
//!
//! | Filter | Mask | Border policy | Output |
//! |--------|------|---------------|--------|
//! | Median | odd, >= 3 | edge replication (clamp) | middle of the sorted window |
//! | Laplacian | exactly 3 | not computed, stays 0 | signed sum clamped to 0-255 |
//!
//! ## Architecture
//!
//! - Kernels are pure per-pixel functions of a read-only grid
//! - [`Filter`] validates its mask before any work is dispatched
//! - Executors call [`Filter::fill_rows`] on a block of rows; the block is the
//!   only memory a caller can write into
//!
//! [`grayscale`] converts decoded RGB pixels into the grid the kernels consume.

pub mod grayscale;
pub mod laplacian;
pub mod median;

use std::fmt;

use ndarray::ArrayViewMut2;

use crate::error::{FilterError, Result};
use crate::grid::PixelGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Median { mask_size: usize },
    Laplacian { mask_size: usize },
}

impl Filter {
    pub fn median(mask_size: usize) -> Self {
        Filter::Median { mask_size }
    }

    pub fn laplacian() -> Self {
        Filter::Laplacian {
            mask_size: laplacian::MASK_SIZE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Median { .. } => "median",
            Filter::Laplacian { .. } => "laplacian",
        }
    }

    pub fn mask_size(&self) -> usize {
        match *self {
            Filter::Median { mask_size } | Filter::Laplacian { mask_size } => mask_size,
        }
    }

    /// Check the mask before dispatch.
    ///
    /// Median needs an odd mask of at least 3 (config error otherwise). The
    /// Laplacian only has a 3x3 kernel; any other size is unsupported.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Filter::Median { mask_size } => validate_mask_size(mask_size),
            Filter::Laplacian { mask_size } if mask_size != laplacian::MASK_SIZE => {
                Err(FilterError::Unsupported {
                    filter: self.name(),
                    mask_size,
                })
            }
            Filter::Laplacian { .. } => Ok(()),
        }
    }

    /// Compute rows `first_row..first_row + out.nrows()` into `out`.
    ///
    /// `out` must be zero-initialized and as wide as `grid`.
    pub fn fill_rows(&self, grid: &PixelGrid, first_row: usize, mut out: ArrayViewMut2<'_, u8>) {
        debug_assert_eq!(out.ncols(), grid.width());
        debug_assert!(first_row + out.nrows() <= grid.height());

        match *self {
            Filter::Median { mask_size } => {
                let mut window = Vec::with_capacity(mask_size * mask_size);
                for (local, mut out_row) in out.rows_mut().into_iter().enumerate() {
                    let row = first_row + local;
                    for (col, cell) in out_row.iter_mut().enumerate() {
                        *cell = median::median_with_scratch(grid, row, col, mask_size, &mut window);
                    }
                }
            }
            Filter::Laplacian { .. } => {
                for (local, mut out_row) in out.rows_mut().into_iter().enumerate() {
                    let row = first_row + local;
                    for (col, cell) in out_row.iter_mut().enumerate() {
                        if let Some(value) = laplacian::laplacian_at(grid, row, col) {
                            *cell = value;
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = self.mask_size();
        write!(f, "{} ({mask}x{mask})", self.name())
    }
}

/// Mask sizes must be odd, at least 3, and small enough that a
/// `mask_size²` window fits in memory addressing.
pub fn validate_mask_size(mask_size: usize) -> Result<()> {
    if mask_size < 3 || mask_size % 2 == 0 {
        return Err(FilterError::config(format!(
            "mask size must be an odd integer >= 3, got {mask_size}"
        )));
    }
    let fits = mask_size
        .checked_mul(mask_size)
        .is_some_and(|cells| cells <= isize::MAX as usize);
    if !fits {
        return Err(FilterError::config(format!(
            "mask size {mask_size} is too large for a {mask_size}x{mask_size} window"
        )));
    }
    Ok(())
}
