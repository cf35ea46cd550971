//! Domain and partitioning
//!
//! The domain is the inclusive integer range `[1, N]`. Parallel runs split it
//! into one contiguous [`SubRange`] per worker.
//!
//! # Partitioning
//!
//! Sub-range `i` of `W` covers `[i * (N / W) + 1, (i + 1) * (N / W)]`. When `W`
//! does not divide `N`, the last sub-range absorbs the remainder so the union
//! is still exactly `[1, N]`:
//!
//! ```text
//! N = 10, W = 3:  [1, 3]  [4, 6]  [7, 10]
//! ```
//!
//! # Example
//!
//! ```
//! use sqrtsum::domain::{partition, Domain};
//!
//! let ranges = partition(&Domain::new(100), 4);
//! let bounds: Vec<(u64, u64)> = ranges.iter().map(|r| (r.start, r.stop)).collect();
//! assert_eq!(bounds, vec![(1, 25), (26, 50), (51, 75), (76, 100)]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive integer domain `[1, size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    size: u64,
}

impl Domain {
    pub const fn new(size: u64) -> Self {
        Self { size }
    }

    /// Number of integers in the domain (also its upper bound)
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The whole domain as a single sub-range (serial mode)
    pub const fn full_range(&self) -> SubRange {
        SubRange {
            index: 0,
            start: 1,
            stop: self.size,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[1, {}]", self.size)
    }
}

/// One worker's contiguous slice of the domain
///
/// `start > stop` denotes an empty slice, which only happens when there are
/// more workers than integers in the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRange {
    /// Position of this slice in the partition
    pub index: usize,
    /// First integer (inclusive)
    pub start: u64,
    /// Last integer (inclusive)
    pub stop: u64,
}

impl SubRange {
    pub fn len(&self) -> u64 {
        if self.stop >= self.start {
            self.stop - self.start + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }

    /// Integers in the slice, in ascending order
    pub fn iter(&self) -> RangeInclusive<u64> {
        self.start..=self.stop
    }
}

impl fmt::Display for SubRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}, {}]", self.index, self.start, self.stop)
    }
}

/// Split `domain` into `workers` contiguous sub-ranges
///
/// Returns an empty partition for zero workers; the config validator rejects
/// that case before a run gets here.
pub fn partition(domain: &Domain, workers: usize) -> Vec<SubRange> {
    if workers == 0 {
        return Vec::new();
    }

    let n = domain.size();
    let w = workers as u64;
    let chunk = n / w;

    (0..workers)
        .map(|index| {
            let i = index as u64;
            let start = i * chunk + 1;
            let stop = if index == workers - 1 {
                n // last sub-range absorbs the remainder
            } else {
                (i + 1) * chunk
            };
            SubRange { index, start, stop }
        })
        .collect()
}
