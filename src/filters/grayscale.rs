//! RGB to intensity conversion.
//!
//! Uses ITU-R BT.601 luma weights and truncates toward zero. Rows are
//! independent, so they are converted in parallel with rayon.

use ndarray::ArrayView3;
use rayon::prelude::*;

use crate::error::{FilterError, Result};
use crate::grid::PixelGrid;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8
}

/// Convert an RGB image of shape `(height, width, 3)` to a grid.
pub fn grayscale_rgb_u8(input: ArrayView3<u8>) -> Result<PixelGrid> {
    let (height, width, channels) = input.dim();
    if channels != 3 {
        return Err(FilterError::config(format!(
            "expected 3 color channels, got {channels}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(FilterError::config(format!(
            "grid dimensions must be positive, got {width}x{height}"
        )));
    }

    let mut samples = vec![0u8; width * height];
    samples
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            }
        });

    PixelGrid::new(width, height, samples)
}
