//! Coordinator module
//!
//! Orchestrates a run: picks the serial or parallel path, launches and joins
//! workers, reads the shared total once, and produces a [`RunReport`].
//!
//! # Parallel run lifecycle
//!
//! ```text
//! Idle -> Partitioned -> WorkersLaunched -> AllJoined -> ResultRead -> Done
//! ```
//!
//! Each transition happens once and only forward. All workers are launched
//! before any is joined; joining inside the launch loop would run them one at
//! a time. The shared total is read only after every worker has been joined.
//!
//! If a thread cannot be launched, the workers that did start are still
//! joined, then the run fails. A partition with a missing worker would leave
//! part of the domain uncounted, so there is no degraded mode.

use crate::accumulator::SharedAccumulator;
use crate::config::validator::validate_config;
use crate::config::{Mode, ReductionConfig};
use crate::domain::{partition, Domain};
use crate::error::ReduceError;
use crate::util::format::format_result_line;
use crate::util::time::Timestamp;
use crate::worker::{sum_sqrt, Worker, WorkerTask};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Partitioned,
    WorkersLaunched,
    AllJoined,
    ResultRead,
    Done,
}

impl RunPhase {
    /// The only phase allowed to follow this one
    pub fn next(self) -> Option<RunPhase> {
        match self {
            Self::Idle => Some(Self::Partitioned),
            Self::Partitioned => Some(Self::WorkersLaunched),
            Self::WorkersLaunched => Some(Self::AllJoined),
            Self::AllJoined => Some(Self::ResultRead),
            Self::ResultRead => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Partitioned => "partitioned",
            Self::WorkersLaunched => "workers_launched",
            Self::AllJoined => "all_joined",
            Self::ResultRead => "result_read",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub domain_size: u64,
    /// Worker threads used (1 for serial)
    pub workers: usize,
    pub sum: f64,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_result_line(self.domain_size, self.sum))
    }
}

/// Runs one reduction according to a [`ReductionConfig`]
///
/// A coordinator produces exactly one result; calling [`Coordinator::run`]
/// again fails with [`ReduceError::InvalidTransition`].
#[derive(Debug)]
pub struct Coordinator {
    config: ReductionConfig,
    phase: RunPhase,
}

impl Coordinator {
    pub fn new(config: ReductionConfig) -> Self {
        Self {
            config,
            phase: RunPhase::Idle,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Validate the configuration, run the configured mode, and report
    pub fn run(&mut self) -> Result<RunReport> {
        validate_config(&self.config).context("Configuration validation failed")?;

        info!(config = %self.config, "starting reduction");
        let start = Timestamp::now();

        let (sum, workers) = match self.config.mode {
            Mode::Serial => (self.reduce_serial()?, 1),
            Mode::Parallel => (self.reduce_parallel()?, self.config.workers),
        };

        Ok(RunReport {
            mode: self.config.mode,
            domain_size: self.config.domain_size,
            workers,
            sum,
            elapsed: start.elapsed(),
        })
    }

    /// Single loop over the whole domain, no synchronization
    ///
    /// The serial path has no intermediate phases; it goes straight from
    /// `Idle` to `Done`.
    pub fn reduce_serial(&mut self) -> std::result::Result<f64, ReduceError> {
        if self.phase != RunPhase::Idle {
            return Err(ReduceError::InvalidTransition {
                from: self.phase,
                to: RunPhase::Done,
            });
        }

        let sum = run_serial(&self.config.domain());
        self.phase = RunPhase::Done;
        Ok(sum)
    }

    /// Partition, launch all workers, join all, read the total once
    ///
    /// Zero workers is an error: an empty partition would report 0.0 for a
    /// domain nobody summed.
    pub fn reduce_parallel(&mut self) -> std::result::Result<f64, ReduceError> {
        self.reduce_parallel_with(spawn_worker)
    }

    fn reduce_parallel_with<S>(&mut self, spawn: S) -> std::result::Result<f64, ReduceError>
    where
        S: FnMut(usize, Worker) -> io::Result<JoinHandle<WorkerResult>>,
    {
        let domain = self.config.domain();

        // Idle -> Partitioned
        self.check_next(RunPhase::Partitioned)?;
        if self.config.workers == 0 {
            return Err(ReduceError::NoWorkers);
        }
        let accumulator = Arc::new(SharedAccumulator::new());
        let tasks: Vec<WorkerTask> = partition(&domain, self.config.workers)
            .into_iter()
            .map(|range| WorkerTask::new(range, Arc::clone(&accumulator)))
            .collect();
        self.phase = RunPhase::Partitioned;
        debug!(domain = %domain, workers = tasks.len(), "domain partitioned");

        // Partitioned -> WorkersLaunched
        let (handles, launch_error) = launch_workers(tasks, spawn);
        if let Some(err) = launch_error {
            // Don't leave launched threads running past the failed run
            let _ = join_workers(handles);
            return Err(err);
        }
        self.advance(RunPhase::WorkersLaunched)?;
        debug!(launched = handles.len(), "all workers launched");

        // WorkersLaunched -> AllJoined
        join_workers(handles)?;
        self.advance(RunPhase::AllJoined)?;

        // AllJoined -> ResultRead; every producer has terminated
        let sum = accumulator.read()?;
        self.advance(RunPhase::ResultRead)?;
        debug!(sum, combines = accumulator.combines()?, "shared total read");

        self.advance(RunPhase::Done)?;
        Ok(sum)
    }

    fn check_next(&self, to: RunPhase) -> std::result::Result<(), ReduceError> {
        if self.phase.next() == Some(to) {
            Ok(())
        } else {
            Err(ReduceError::InvalidTransition {
                from: self.phase,
                to,
            })
        }
    }

    fn advance(&mut self, to: RunPhase) -> std::result::Result<(), ReduceError> {
        self.check_next(to)?;
        self.phase = to;
        Ok(())
    }
}

type WorkerResult = std::result::Result<f64, ReduceError>;
type WorkerHandle = (usize, JoinHandle<WorkerResult>);

/// Run `worker` on its own named OS thread
fn spawn_worker(index: usize, worker: Worker) -> io::Result<JoinHandle<WorkerResult>> {
    thread::Builder::new()
        .name(format!("sqrtsum-worker-{}", index))
        .spawn(move || worker.run())
}

/// Spawn one thread per task without waiting on any of them
///
/// Stops at the first spawn failure and returns it alongside the handles that
/// were launched; the remaining tasks are dropped unlaunched.
fn launch_workers<S>(tasks: Vec<WorkerTask>, mut spawn: S) -> (Vec<WorkerHandle>, Option<ReduceError>)
where
    S: FnMut(usize, Worker) -> io::Result<JoinHandle<WorkerResult>>,
{
    let mut handles = Vec::with_capacity(tasks.len());

    for task in tasks {
        let index = task.range().index;

        match spawn(index, Worker::new(task)) {
            Ok(handle) => handles.push((index, handle)),
            Err(source) => return (handles, Some(ReduceError::WorkerSpawn { index, source })),
        }
    }

    (handles, None)
}

/// Wait for every worker, then report the first failure if any
fn join_workers(handles: Vec<WorkerHandle>) -> std::result::Result<(), ReduceError> {
    let mut first_error = None;

    for (index, handle) in handles {
        let outcome = match handle.join() {
            Ok(result) => result,
            Err(_) => Err(ReduceError::WorkerPanicked { index }),
        };

        if let Err(err) = outcome {
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Serial reduction over the whole domain
pub fn run_serial(domain: &Domain) -> f64 {
    sum_sqrt(&domain.full_range()).value()
}

/// Parallel reduction of `domain` across `workers` threads
pub fn run_parallel(domain: &Domain, workers: usize) -> std::result::Result<f64, ReduceError> {
    let config = ReductionConfig::new(domain.size(), workers, Mode::Parallel);
    Coordinator::new(config).reduce_parallel()
}
