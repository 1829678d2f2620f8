//! Read-only grid of 8-bit intensities.
//!
//! A [`PixelGrid`] owns one contiguous row-major buffer (an ndarray
//! `Array2<u8>` of shape `(height, width)`). Every filter takes the grid by
//! shared reference and produces a new grid; nothing mutates a grid after it
//! has been built.

use ndarray::{Array2, ArrayView2};

use crate::error::{FilterError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    samples: Array2<u8>,
}

impl PixelGrid {
    /// Build a grid from a row-major sample buffer.
    ///
    /// Fails with a config error if either dimension is zero or the buffer
    /// length is not `width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let len = samples.len();
        let samples = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            FilterError::config(format!(
                "expected {} samples for a {width}x{height} grid, got {len}",
                width * height
            ))
        })?;
        Ok(Self { samples })
    }

    /// Grid where every cell holds `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            samples: Array2::from_elem((height, width), value),
        })
    }

    /// Grid whose cell `(row, col)` is `f(row, col)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl FnMut((usize, usize)) -> u8,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            samples: Array2::from_shape_fn((height, width), f),
        })
    }

    pub fn from_array(samples: Array2<u8>) -> Result<Self> {
        let (height, width) = samples.dim();
        check_dimensions(width, height)?;
        Ok(Self { samples })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bounds-checked access; `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.samples.get((row, col)).copied()
    }

    /// Access with edge replication: each coordinate is clamped independently
    /// to the nearest valid row/column.
    #[inline]
    pub fn clamped(&self, row: isize, col: isize) -> u8 {
        let r = row.clamp(0, self.height() as isize - 1) as usize;
        let c = col.clamp(0, self.width() as isize - 1) as usize;
        self.samples[[r, c]]
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.samples.view()
    }
}

impl std::ops::Index<(usize, usize)> for PixelGrid {
    type Output = u8;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.samples[[row, col]]
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::config(format!(
            "grid dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}
