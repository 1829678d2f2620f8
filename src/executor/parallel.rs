//! Row-partitioned parallel execution.
//!
//! The output buffer is allocated once, split into disjoint row blocks (one
//! per worker) and each block is moved into its own worker thread. The
//! borrow checker proves no two workers touch the same cell, so the workers
//! share nothing mutable and need no locks. The orchestrator joins every
//! worker before the buffer is turned back into a grid.
//!
//! A run moves through [`Phase::Configured`] → [`Phase::BufferAllocated`] →
//! [`Phase::WorkersSpawned`] → [`Phase::Joined`] → [`Phase::Completed`], or
//! ends in [`Phase::Failed`]. If spawning worker `k` fails, workers
//! `0..k` are joined before the error is returned and the buffer dropped.
//!
//! Workers cannot be cancelled; a stalled worker stalls the join.

use std::fmt;
use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};

use ndarray::{Array2, ArrayViewMut2, Axis};
use tracing::{debug, warn};

use super::partition::{partition_rows, RowRange};
use super::Executor;
use crate::error::{FilterError, ResourceError, Result};
use crate::filters::Filter;
use crate::grid::PixelGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Configured,
    BufferAllocated,
    WorkersSpawned,
    Joined,
    Completed,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Configured => "configured",
            Phase::BufferAllocated => "buffer-allocated",
            Phase::WorkersSpawned => "workers-spawned",
            Phase::Joined => "joined",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Creates the execution unit for one worker.
///
/// The default [`ThreadSpawner`] starts a named OS thread inside the run's
/// scope. Any spawner must either start `task` or return an error without
/// running it.
pub trait Spawner {
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        worker: usize,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSpawner;

impl Spawner for ThreadSpawner {
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        worker: usize,
        task: F,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope,
    {
        thread::Builder::new()
            .name(format!("filter-worker-{worker}"))
            .spawn_scoped(scope, task)
    }
}

/// Runs a filter across `workers` threads, each owning a contiguous block
/// of rows.
#[derive(Clone, Debug)]
pub struct ParallelExecutor<S = ThreadSpawner> {
    workers: usize,
    spawner: S,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Result<Self> {
        Self::with_spawner(workers, ThreadSpawner)
    }
}

impl<S: Spawner> ParallelExecutor<S> {
    pub fn with_spawner(workers: usize, spawner: S) -> Result<Self> {
        if workers == 0 {
            return Err(FilterError::config("worker count must be at least 1"));
        }
        Ok(Self { workers, spawner })
    }

    fn run(&self, grid: &PixelGrid, filter: Filter, phase: &mut PhaseLog) -> Result<PixelGrid> {
        filter.validate()?;
        let ranges = partition_rows(grid.height(), self.workers)?;

        let mut buffer = allocate(grid.width(), grid.height())?;
        phase.advance(Phase::BufferAllocated);

        let blocks = split_rows(buffer.view_mut(), &ranges);

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(blocks.len());

            for (worker, (range, block)) in ranges.iter().copied().zip(blocks).enumerate() {
                let task = move || {
                    debug!(worker, start = range.start, end = range.end, "worker started");
                    filter.fill_rows(grid, range.start, block);
                    debug!(worker, "worker finished");
                };

                match self.spawner.spawn(scope, worker, task) {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(source) => {
                        let spawned = handles.len();
                        warn!(worker, spawned, error = %source, "worker spawn failed, draining");
                        // Errors from drained workers are superseded by the spawn failure.
                        let _ = join_all(handles);
                        return Err(ResourceError::WorkerSpawn {
                            worker,
                            spawned,
                            source,
                        }
                        .into());
                    }
                }
            }
            phase.advance(Phase::WorkersSpawned);

            join_all(handles)
        })?;
        phase.advance(Phase::Joined);

        let result = PixelGrid::from_array(buffer)?;
        phase.advance(Phase::Completed);
        Ok(result)
    }
}

impl<S: Spawner> Executor for ParallelExecutor<S> {
    fn apply(&self, grid: &PixelGrid, filter: Filter) -> Result<PixelGrid> {
        let mut phase = PhaseLog::new(filter, self.workers);
        let result = self.run(grid, filter, &mut phase);
        if let Err(err) = &result {
            phase.fail(err);
        }
        result
    }
}

struct PhaseLog {
    filter: Filter,
    workers: usize,
    current: Phase,
}

impl PhaseLog {
    fn new(filter: Filter, workers: usize) -> Self {
        debug!(%filter, workers, phase = %Phase::Configured, "parallel run");
        Self {
            filter,
            workers,
            current: Phase::Configured,
        }
    }

    fn advance(&mut self, next: Phase) {
        debug!(filter = %self.filter, workers = self.workers, from = %self.current, to = %next, "phase");
        self.current = next;
    }

    fn fail(&mut self, err: &FilterError) {
        warn!(filter = %self.filter, workers = self.workers, phase = %self.current, error = %err, "parallel run failed");
        self.current = Phase::Failed;
    }
}

fn allocate(width: usize, height: usize) -> Result<Array2<u8>> {
    let cells = width * height;
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(cells)
        .map_err(|_| ResourceError::Allocation { cells })?;
    samples.resize(cells, 0);

    Array2::from_shape_vec((height, width), samples)
        .map_err(|e| FilterError::config(format!("output buffer shape: {e}")))
}

/// Split `buffer` into one exclusive row block per range.
fn split_rows<'a>(mut buffer: ArrayViewMut2<'a, u8>, ranges: &[RowRange]) -> Vec<ArrayViewMut2<'a, u8>> {
    let mut blocks = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (block, rest) = buffer.split_at(Axis(0), range.len());
        blocks.push(block);
        buffer = rest;
    }
    debug_assert_eq!(buffer.nrows(), 0);
    blocks
}

/// Join every handle, even after a failure, and report the first panic.
fn join_all(handles: Vec<(usize, ScopedJoinHandle<'_, ()>)>) -> Result<()> {
    let mut first_panic = None;
    for (worker, handle) in handles {
        if handle.join().is_err() && first_panic.is_none() {
            first_panic = Some(worker);
        }
    }
    match first_panic {
        Some(worker) => Err(ResourceError::WorkerPanicked { worker }.into()),
        None => Ok(()),
    }
}
