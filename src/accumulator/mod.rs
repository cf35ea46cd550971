//! Shared accumulator
//!
//! The single piece of mutable state shared between workers: a compensated
//! total behind a mutex. The coordinator creates it, hands each worker an
//! `Arc` at construction time, and reads it once after every worker has been
//! joined.
//!
//! # Lock granularity
//!
//! Workers combine exactly once, with their finished local sum. Locking per
//! element inside the kernel loop would give the same answer and serialize
//! billions of lock round-trips. [`SharedAccumulator::combines`] counts combine
//! calls so tests can pin the once-per-worker contract.
//!
//! # Example
//!
//! ```
//! use sqrtsum::accumulator::SharedAccumulator;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let acc = Arc::new(SharedAccumulator::new());
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let acc = Arc::clone(&acc);
//!         thread::spawn(move || acc.combine((i + 1) as f64))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap()?;
//! }
//! assert_eq!(acc.read()?, 10.0);
//! # Ok::<(), sqrtsum::ReduceError>(())
//! ```

use crate::error::ReduceError;
use crate::util::summation::CompensatedSum;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct AccumulatorState {
    total: CompensatedSum,
    combines: usize,
}

/// Mutex-guarded running total shared by all workers
#[derive(Debug, Default)]
pub struct SharedAccumulator {
    state: Mutex<AccumulatorState>,
}

impl SharedAccumulator {
    /// Create an accumulator at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the total
    ///
    /// Calls are serialized: concurrent combines behave as if run one after
    /// another in some order. The guard is released when it drops, on every
    /// path out of this function.
    pub fn combine(&self, delta: f64) -> Result<(), ReduceError> {
        let mut state = self.lock()?;
        state.total.add(delta);
        state.combines += 1;
        Ok(())
    }

    /// Fold a worker's whole compensated sum into the total
    ///
    /// Keeps the worker's compensation term instead of collapsing it to one
    /// `f64` first. Counts as a single combine.
    pub fn combine_partial(&self, partial: &CompensatedSum) -> Result<(), ReduceError> {
        let mut state = self.lock()?;
        state.total.merge(partial);
        state.combines += 1;
        Ok(())
    }

    /// Current total
    ///
    /// Only meaningful once every producer has finished combining; the
    /// coordinator guarantees that by joining all workers first.
    pub fn read(&self) -> Result<f64, ReduceError> {
        Ok(self.lock()?.total.value())
    }

    /// Number of combine calls so far
    pub fn combines(&self) -> Result<usize, ReduceError> {
        Ok(self.lock()?.combines)
    }

    fn lock(&self) -> Result<MutexGuard<'_, AccumulatorState>, ReduceError> {
        self.state.lock().map_err(|_| ReduceError::AccumulatorPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        let acc = SharedAccumulator::new();
        assert_eq!(acc.read().unwrap(), 0.0);
        assert_eq!(acc.combines().unwrap(), 0);
    }

    #[test]
    fn test_combine_sequential() {
        let acc = SharedAccumulator::new();
        acc.combine(1.5).unwrap();
        acc.combine(2.5).unwrap();

        assert_eq!(acc.read().unwrap(), 4.0);
        assert_eq!(acc.combines().unwrap(), 2);
    }

    #[test]
    fn test_combine_partial_keeps_compensation() {
        let mut partial = CompensatedSum::new();
        for x in [1.0, 1e100, 1.0, -1e100] {
            partial.add(x);
        }

        let acc = SharedAccumulator::new();
        acc.combine_partial(&partial).unwrap();

        assert_eq!(acc.read().unwrap(), 2.0);
        assert_eq!(acc.combines().unwrap(), 1);
    }

    #[test]
    fn test_no_lost_updates() {
        const WORKERS: usize = 8;
        let expected = (WORKERS * (WORKERS + 1) / 2) as f64;

        for trial in 0..500 {
            let acc = Arc::new(SharedAccumulator::new());

            let handles: Vec<_> = (0..WORKERS)
                .map(|i| {
                    let acc = Arc::clone(&acc);
                    thread::spawn(move || acc.combine((i + 1) as f64).unwrap())
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(acc.read().unwrap(), expected, "trial {}", trial);
            assert_eq!(acc.combines().unwrap(), WORKERS, "trial {}", trial);
        }
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let acc = Arc::new(SharedAccumulator::new());

        let poisoner = Arc::clone(&acc);
        let result = thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("worker died inside the critical section");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(acc.combine(1.0), Err(ReduceError::AccumulatorPoisoned)));
        assert!(matches!(acc.read(), Err(ReduceError::AccumulatorPoisoned)));
    }
}
