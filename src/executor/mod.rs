//! Strategies for applying a [`Filter`] across a whole grid.
//!
//! Both executors validate the filter before doing any work and return a new
//! grid with the input's dimensions. For the same input and filter they
//! produce identical output.

pub mod parallel;
pub mod partition;
pub mod sequential;

pub use parallel::{ParallelExecutor, Phase, Spawner, ThreadSpawner};
pub use partition::{partition_rows, RowRange};
pub use sequential::SequentialExecutor;

use crate::error::Result;
use crate::filters::Filter;
use crate::grid::PixelGrid;

pub trait Executor {
    fn apply(&self, grid: &PixelGrid, filter: Filter) -> Result<PixelGrid>;
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn apply(&self, grid: &PixelGrid, filter: Filter) -> Result<PixelGrid> {
        (**self).apply(grid, filter)
    }
}
