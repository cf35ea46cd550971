//! sqrtsum entry point
//!
//! Runs the reduction configured at build time and prints the single result
//! line on stdout. Diagnostics go to stderr through `tracing`; set `RUST_LOG`
//! (e.g. `RUST_LOG=sqrtsum=debug`) to see per-worker detail.

use anyhow::{Context, Result};
use sqrtsum::coordinator::Coordinator;
use sqrtsum::util::time::RunTiming;
use sqrtsum::ReductionConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ReductionConfig::default();
    let mut coordinator = Coordinator::new(config);
    let report = coordinator.run().context("Reduction failed")?;

    info!(
        mode = %report.mode,
        workers = report.workers,
        timing = %RunTiming::new(report.domain_size, report.elapsed),
        "reduction finished"
    );
    debug!(report = %serde_json::to_string(&report)?, "run report");

    println!("{}", report);

    Ok(())
}
