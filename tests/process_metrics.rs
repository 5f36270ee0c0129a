// Default process metrics must register once per process, however many
// endpoints are configured in one batch.
use std::time::Duration;
use tamarin::collector::process;
use tamarin::exporter;

#[tokio::test]
async fn test_default_process_metrics_initialize_once() {
    let registry = exporter::install_recorder();

    // First call performs the registration, every later one is a no-op.
    assert!(process::initialize());
    assert!(!process::initialize());
    assert!(!process::initialize());

    // Let the sampling task publish its first sample.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let body = registry.render();
    let samples = body
        .lines()
        .filter(|line| line.starts_with("process_cpu_percent"))
        .count();
    assert_eq!(samples, 1);
}
