use sqrtsum::coordinator::{run_parallel, run_serial, Coordinator, RunPhase};
use sqrtsum::domain::{partition, Domain};
use sqrtsum::{Mode, ReductionConfig};

/// sqrt(1) + ... + sqrt(100), computed independently
const SUM_TO_100: f64 = 671.462_947_103_147_7;

/// sqrt(1) + ... + sqrt(1000), computed independently
const SUM_TO_1000: f64 = 21_097.455_887_480_737;

fn relative_error(actual: f64, expected: f64) -> f64 {
    (actual - expected).abs() / expected.abs()
}

#[test]
fn hundred_by_four_scenario() {
    let domain = Domain::new(100);

    let bounds: Vec<(u64, u64)> = partition(&domain, 4)
        .iter()
        .map(|r| (r.start, r.stop))
        .collect();
    assert_eq!(bounds, vec![(1, 25), (26, 50), (51, 75), (76, 100)]);

    let serial = run_serial(&domain);
    let parallel = run_parallel(&domain, 4).unwrap();

    assert!(relative_error(serial, SUM_TO_100) < 1e-12, "serial = {}", serial);
    assert!(relative_error(parallel, SUM_TO_100) < 1e-12, "parallel = {}", parallel);
}

#[test]
fn parallel_agrees_with_serial() {
    let domain = Domain::new(1000);

    let serial = run_serial(&domain);
    let parallel = run_parallel(&domain, 4).unwrap();

    assert!(relative_error(parallel, serial) < 1e-9);
    assert!(relative_error(serial, SUM_TO_1000) < 1e-12);
}

#[test]
fn serial_is_deterministic() {
    let domain = Domain::new(250_000);
    assert_eq!(run_serial(&domain).to_bits(), run_serial(&domain).to_bits());
}

#[test]
fn single_worker_matches_serial_exactly() {
    let domain = Domain::new(50_000);
    assert_eq!(
        run_parallel(&domain, 1).unwrap().to_bits(),
        run_serial(&domain).to_bits()
    );
}

#[test]
fn repeated_parallel_runs_lose_nothing() {
    let domain = Domain::new(10_000);
    let serial = run_serial(&domain);

    for trial in 0..50 {
        let parallel = run_parallel(&domain, 8).unwrap();
        assert!(
            relative_error(parallel, serial) < 1e-12,
            "trial {}: {} vs {}",
            trial,
            parallel,
            serial
        );
    }
}

#[test]
fn coordinator_reports_once() {
    let mut coordinator = Coordinator::new(ReductionConfig::new(1000, 4, Mode::Parallel));
    let report = coordinator.run().unwrap();

    assert_eq!(coordinator.phase(), RunPhase::Done);
    assert_eq!(
        report.to_string(),
        "Final sum of square root of 1,000 numbers is: 21097.455887"
    );
    assert!(coordinator.run().is_err());
}

#[test]
fn zero_workers_is_rejected() {
    assert!(run_parallel(&Domain::new(100), 0).is_err());
}
