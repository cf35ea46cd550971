//! Error types for the reduction pipeline
//!
//! Every failure here is fatal to the run. Nothing is retried: the computation
//! is deterministic, so a failure points at the environment (thread limits,
//! a panicking worker) rather than at something transient.

use crate::coordinator::RunPhase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduceError {
    /// The OS refused to create a worker thread
    #[error("failed to launch worker {index}: {source}")]
    WorkerSpawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// A parallel run needs at least one worker to cover the domain
    #[error("parallel reduction needs at least one worker")]
    NoWorkers,

    #[error("worker {index} panicked before combining its partial sum")]
    WorkerPanicked { index: usize },

    /// A thread panicked while holding the accumulator guard
    #[error("shared accumulator lock was poisoned")]
    AccumulatorPoisoned,

    #[error("invalid run transition from {from} to {to}")]
    InvalidTransition { from: RunPhase, to: RunPhase },
}
