use metrics::{counter, gauge};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::host::HostHandle;

// --- Constants ---
const PROCESS_SAMPLE_INTERVAL_SECS: u64 = 15;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Register the agent's own `process_*` series, at most once per process.
///
/// Returns `true` on the call that actually performed the registration and
/// `false` on every subsequent call, however many endpoints are configured.
pub fn initialize() -> bool {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let host = match HostHandle::current() {
        Ok(host) => host,
        Err(e) => {
            warn!("Default process metrics unavailable: {}", e);
            return true;
        }
    };

    tokio::spawn(async move {
        debug!("Default process metrics started for pid {}", host.pid());

        let mut ticker = tokio::time::interval(Duration::from_secs(PROCESS_SAMPLE_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            if let Some(sample) = host.sample() {
                gauge!("process_cpu_percent").set(sample.cpu_percent);
                gauge!("process_resident_memory_bytes").set(sample.memory_bytes as f64);
                gauge!("process_virtual_memory_bytes").set(sample.virtual_memory_bytes as f64);
                gauge!("process_run_time_seconds").set(sample.run_time_seconds as f64);
                counter!("process_disk_read_bytes_total").absolute(sample.disk_read_bytes);
                counter!("process_disk_written_bytes_total").absolute(sample.disk_written_bytes);
            }
        }
    });

    true
}
