//! Static, row-contiguous work partitioning.

use std::ops::Range;

use crate::error::{FilterError, Result};

/// Half-open range of rows owned by exactly one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `[0, height)` into `workers` contiguous ranges.
///
/// Every worker gets `height / workers` rows; the last one also takes the
/// `height % workers` leftover rows. When `workers > height` the leading
/// ranges are empty.
pub fn partition_rows(height: usize, workers: usize) -> Result<Vec<RowRange>> {
    if workers == 0 {
        return Err(FilterError::config("worker count must be at least 1"));
    }

    let rows_per_worker = height / workers;
    let remainder = height % workers;

    let ranges = (0..workers)
        .map(|w| {
            let start = w * rows_per_worker;
            let mut end = start + rows_per_worker;
            if w == workers - 1 {
                end += remainder;
            }
            RowRange::new(start, end)
        })
        .collect();

    Ok(ranges)
}
