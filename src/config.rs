//! Validated run configuration.

use std::path::{Path, PathBuf};

use crate::error::{FilterError, Result};
use crate::executor::{Executor, ParallelExecutor, SequentialExecutor};
use crate::filters::validate_mask_size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Parallel,
    Sequential,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub image_path: PathBuf,
    pub mask_size: usize,
    pub workers: usize,
    pub output_dir: PathBuf,
    pub mode: ExecutionMode,
}

impl RunConfig {
    /// Checks that `mask_size` is odd and >= 3 and `workers` >= 1.
    pub fn new(image_path: impl Into<PathBuf>, mask_size: usize, workers: usize) -> Result<Self> {
        validate_mask_size(mask_size)?;
        validate_workers(workers)?;
        Ok(Self {
            image_path: image_path.into(),
            mask_size,
            workers,
            output_dir: PathBuf::from("."),
            mode: ExecutionMode::default(),
        })
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn executor(&self) -> Result<Box<dyn Executor>> {
        let executor: Box<dyn Executor> = match self.mode {
            ExecutionMode::Parallel => Box::new(ParallelExecutor::new(self.workers)?),
            ExecutionMode::Sequential => Box::new(SequentialExecutor::new()),
        };
        Ok(executor)
    }
}

pub fn validate_workers(workers: usize) -> Result<()> {
    if workers < 1 {
        return Err(FilterError::config(format!(
            "worker count must be at least 1, got {workers}"
        )));
    }
    Ok(())
}
