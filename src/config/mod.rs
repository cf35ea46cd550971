//! Configuration module
//!
//! Everything about a run is fixed at build time: the domain size, the worker
//! count, and (through the `parallel` cargo feature) the execution mode. The
//! binary never reads flags, files, or the environment to change them.
//! [`ReductionConfig`] exists so tests and benches can run the same pipeline
//! on a smaller domain.

pub mod validator;

use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the domain `[1, N]`
pub const DOMAIN_SIZE: u64 = 10_000_000_000;

/// Worker threads in parallel mode
pub const WORKER_COUNT: usize = 4;

/// Orchestration path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One loop over the whole domain on the calling thread
    Serial,
    /// One worker thread per sub-range, combined through a shared accumulator
    Parallel,
}

impl Mode {
    /// The mode compiled into this build
    pub const fn configured() -> Self {
        if cfg!(feature = "parallel") {
            Self::Parallel
        } else {
            Self::Serial
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::configured()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReductionConfig {
    /// Upper bound of the domain `[1, domain_size]`
    #[serde(default = "default_domain_size")]
    pub domain_size: u64,
    /// Number of workers (parallel mode only)
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub mode: Mode,
}

fn default_domain_size() -> u64 {
    DOMAIN_SIZE
}

fn default_workers() -> usize {
    WORKER_COUNT
}

impl ReductionConfig {
    pub fn new(domain_size: u64, workers: usize, mode: Mode) -> Self {
        Self {
            domain_size,
            workers,
            mode,
        }
    }

    pub fn domain(&self) -> Domain {
        Domain::new(self.domain_size)
    }
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            domain_size: default_domain_size(),
            workers: default_workers(),
            mode: Mode::configured(),
        }
    }
}

impl fmt::Display for ReductionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Serial => write!(f, "serial over {}", self.domain()),
            Mode::Parallel => write!(
                f,
                "parallel over {} with {} worker(s)",
                self.domain(),
                self.workers
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReductionConfig::default();
        assert_eq!(config.domain_size, 10_000_000_000);
        assert_eq!(config.workers, 4);
        assert_eq!(config.mode, Mode::configured());
        assert_eq!(config.domain().size(), DOMAIN_SIZE);
    }

    #[test]
    fn test_configured_mode_follows_feature() {
        #[cfg(feature = "parallel")]
        assert_eq!(Mode::configured(), Mode::Parallel);
        #[cfg(not(feature = "parallel"))]
        assert_eq!(Mode::configured(), Mode::Serial);
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::Serial.to_string(), "serial");
        assert_eq!(Mode::Parallel.to_string(), "parallel");

        let config = ReductionConfig::new(100, 4, Mode::Parallel);
        assert_eq!(config.to_string(), "parallel over [1, 100] with 4 worker(s)");

        let config = ReductionConfig::new(100, 4, Mode::Serial);
        assert_eq!(config.to_string(), "serial over [1, 100]");
    }
}
