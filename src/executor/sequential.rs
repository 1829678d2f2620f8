//! Single-threaded execution.

use ndarray::Array2;
use tracing::debug;

use super::Executor;
use crate::error::Result;
use crate::filters::Filter;
use crate::grid::PixelGrid;

/// Applies a filter over the whole grid on the calling thread, row-major.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SequentialExecutor {
    fn apply(&self, grid: &PixelGrid, filter: Filter) -> Result<PixelGrid> {
        filter.validate()?;
        debug!(%filter, width = grid.width(), height = grid.height(), "sequential pass");

        let mut output = Array2::<u8>::zeros((grid.height(), grid.width()));
        filter.fill_rows(grid, 0, output.view_mut());

        PixelGrid::from_array(output)
    }
}
