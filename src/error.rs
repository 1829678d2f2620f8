//! Error taxonomy shared by every stage.

use std::io;
use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Invalid mask size, worker count or grid dimensions.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input file is not a 24-bit uncompressed bitmap.
    #[error("unsupported bitmap format: {0}")]
    Format(String),

    #[error("I/O error on '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Filter cannot honor the requested parameters.
    #[error("{filter} filter does not support a {mask_size}x{mask_size} mask")]
    Unsupported {
        filter: &'static str,
        mask_size: usize,
    },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("output buffer of {cells} cells could not be allocated")]
    Allocation { cells: usize },

    /// Spawning worker `worker` failed after `spawned` workers were already running.
    #[error("failed to spawn worker {worker} ({spawned} already spawned and drained): {source}")]
    WorkerSpawn {
        worker: usize,
        spawned: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {worker} terminated abnormally")]
    WorkerPanicked { worker: usize },
}

impl FilterError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
