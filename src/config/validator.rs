//! Configuration validation
//!
//! Rejects configurations the pipeline cannot run and warns about ones that
//! run but are probably not what was meant.

use super::*;
use anyhow::Result;
use tracing::warn;

/// Validate complete configuration
pub fn validate_config(config: &ReductionConfig) -> Result<()> {
    if config.domain_size == 0 {
        anyhow::bail!("domain_size must be at least 1");
    }

    if config.mode == Mode::Parallel {
        validate_workers(config)?;
    }

    Ok(())
}

/// Validate the worker count against the domain and the host
fn validate_workers(config: &ReductionConfig) -> Result<()> {
    if config.workers == 0 {
        anyhow::bail!("workers must be at least 1");
    }

    if config.workers as u64 > config.domain_size {
        anyhow::bail!(
            "workers ({}) must not exceed domain_size ({})",
            config.workers,
            config.domain_size
        );
    }

    let remainder = config.domain_size % config.workers as u64;
    if remainder != 0 {
        warn!(
            domain_size = config.domain_size,
            workers = config.workers,
            remainder,
            "domain does not divide evenly; last worker absorbs the remainder"
        );
    }

    let cpus = num_cpus::get();
    if config.workers > cpus {
        warn!(
            workers = config.workers,
            cpus, "more workers than CPUs; threads will time-share cores"
        );
    }

    Ok(())
}
