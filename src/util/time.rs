//! Timing utilities
//!
//! Wall-clock measurement of a run and the elapsed/rate summary that goes to
//! the log when it finishes.

use std::fmt;
use std::time::{Duration, Instant};

/// Start point of a timed section
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }
}

/// Decimal prefixes for square roots per second, largest first
const RATE_PREFIXES: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "K")];

/// How long a run took over how many elements
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sqrtsum::util::time::RunTiming;
///
/// let timing = RunTiming::new(10_000_000_000, Duration::from_secs(4));
/// assert_eq!(timing.to_string(), "4.00s at 2.50G sqrt/s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTiming {
    elements: u64,
    elapsed: Duration,
}

impl RunTiming {
    pub fn new(elements: u64, elapsed: Duration) -> Self {
        Self { elements, elapsed }
    }

    /// Square roots taken per second; zero if no time was measured
    pub fn elements_per_sec(&self) -> f64 {
        match self.elapsed.as_secs_f64() {
            secs if secs > 0.0 => self.elements as f64 / secs,
            _ => 0.0,
        }
    }
}

impl fmt::Display for RunTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f64();
        if secs >= 60.0 {
            write!(f, "{}m{:05.2}s", self.elapsed.as_secs() / 60, secs % 60.0)?;
        } else if secs >= 1.0 {
            write!(f, "{:.2}s", secs)?;
        } else {
            write!(f, "{:.3}ms", secs * 1e3)?;
        }

        let rate = self.elements_per_sec();
        match RATE_PREFIXES.iter().find(|(scale, _)| rate >= *scale) {
            Some((scale, prefix)) => write!(f, " at {:.2}{} sqrt/s", rate / scale, prefix),
            None => write!(f, " at {:.0} sqrt/s", rate),
        }
    }
}
