//! sqrtsum - sum of square roots over `1..=N`, serial or multi-threaded
//!
//! sqrtsum computes `sqrt(1) + sqrt(2) + ... + sqrt(N)` for a large fixed `N`
//! and shows what a fixed pool of worker threads buys over a single loop for an
//! embarrassingly-parallel reduction.
//!
//! # Architecture
//!
//! - **Domain partitioning**: `[1, N]` split into contiguous per-worker sub-ranges
//! - **Workers**: one thread per sub-range, local compensated sum, one combine
//! - **Shared accumulator**: a mutex-guarded compensated total
//! - **Coordinator**: launch all, join all, read once, report
//!
//! The serial and parallel paths share the same kernel ([`worker::sum_sqrt`]).
//! Which one the binary runs is a build-time choice (cargo feature `parallel`).

pub mod accumulator;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use accumulator::SharedAccumulator;
pub use config::{Mode, ReductionConfig};
pub use coordinator::{Coordinator, RunReport};
pub use domain::{Domain, SubRange};
pub use error::ReduceError;

/// Result type used throughout sqrtsum
pub type Result<T> = anyhow::Result<T>;
