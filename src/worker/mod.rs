//! Worker kernel and per-thread execution
//!
//! A worker owns one [`SubRange`] and computes `sqrt(start) + ... + sqrt(stop)`
//! into a local compensated sum (map), then combines that sum into the
//! [`SharedAccumulator`] exactly once (reduce). Nothing outside the worker sees
//! a partial result before the combine.
//!
//! [`sum_sqrt`] is the kernel. The serial path calls it directly over the whole
//! domain; the parallel path calls it once per worker thread.
//!
//! # Example
//!
//! ```
//! use sqrtsum::accumulator::SharedAccumulator;
//! use sqrtsum::domain::SubRange;
//! use sqrtsum::worker::{Worker, WorkerTask};
//! use std::sync::Arc;
//!
//! let acc = Arc::new(SharedAccumulator::new());
//! let task = WorkerTask::new(SubRange { index: 0, start: 1, stop: 4 }, Arc::clone(&acc));
//!
//! let partial = Worker::new(task).run()?;
//! assert_eq!(acc.read()?, partial);
//! # Ok::<(), sqrtsum::ReduceError>(())
//! ```

use crate::accumulator::SharedAccumulator;
use crate::domain::SubRange;
use crate::error::ReduceError;
use crate::util::summation::CompensatedSum;
use std::sync::Arc;
use tracing::debug;

/// Sum of square roots over `range`, in ascending order
#[inline]
pub fn sum_sqrt(range: &SubRange) -> CompensatedSum {
    let mut sum = CompensatedSum::new();
    for i in range.iter() {
        sum.add((i as f64).sqrt());
    }
    sum
}

/// Everything one worker needs: its slice of the domain and the shared total
///
/// Built by the coordinator before launch and moved into the worker thread.
#[derive(Debug)]
pub struct WorkerTask {
    range: SubRange,
    accumulator: Arc<SharedAccumulator>,
}

impl WorkerTask {
    pub fn new(range: SubRange, accumulator: Arc<SharedAccumulator>) -> Self {
        Self { range, accumulator }
    }

    pub fn range(&self) -> &SubRange {
        &self.range
    }
}

/// One parallel execution unit
///
/// Consumes its task: a worker runs once and is discarded.
#[derive(Debug)]
pub struct Worker {
    task: WorkerTask,
}

impl Worker {
    pub fn new(task: WorkerTask) -> Self {
        Self { task }
    }

    /// Compute the local sum, combine it once, and return it
    pub fn run(self) -> Result<f64, ReduceError> {
        let WorkerTask { range, accumulator } = self.task;

        let local = sum_sqrt(&range);
        accumulator.combine_partial(&local)?;

        let partial = local.value();
        debug!(worker = range.index, range = %range, partial, "combined partial sum");
        Ok(partial)
    }
}
