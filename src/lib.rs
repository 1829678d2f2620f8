//! Gridstag
//!
//! Spatial filters over 8-bit grayscale grids decoded from 24-bit bitmaps,
//! with optional row-partitioned parallel execution.
//!
//! ## Image Format
//! A [`PixelGrid`] is a single contiguous row-major buffer of `u8`
//! intensities with shape `(height, width)`. Grids are read-only once built;
//! every filter returns a new grid of the same dimensions.
//!
//! ## Filters
//! - **Median**: order statistic over a `mask_size × mask_size` window, odd
//!   mask >= 3, edges replicated.
//! - **Laplacian**: fixed 3x3 kernel (center 8, neighbors -1), border pixels
//!   left at 0.
//!
//! ## Execution
//! [`SequentialExecutor`] walks the grid on the calling thread.
//! [`ParallelExecutor`] splits the rows into `P` contiguous blocks, hands
//! each block to its own worker thread and joins them all before the
//! result is returned. Both produce identical output.
//!
//! ```
//! use gridstag::{Executor, Filter, ParallelExecutor, PixelGrid, SequentialExecutor};
//!
//! let grid = PixelGrid::from_fn(8, 6, |(r, c)| (r * 30 + c * 7) as u8).unwrap();
//! let parallel = ParallelExecutor::new(3).unwrap().apply(&grid, Filter::median(3)).unwrap();
//! let sequential = SequentialExecutor.apply(&grid, Filter::median(3)).unwrap();
//! assert_eq!(parallel, sequential);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod filters;
pub mod grid;
pub mod logging;
pub mod naming;
pub mod pipeline;

pub use config::{ExecutionMode, RunConfig};
pub use error::{FilterError, ResourceError, Result};
pub use executor::{Executor, ParallelExecutor, RowRange, SequentialExecutor};
pub use filters::Filter;
pub use grid::PixelGrid;
pub use pipeline::{Pipeline, Stage, StageOutput};
