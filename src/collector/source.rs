use metrics::{counter, gauge, Label};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::host::HostHandle;

/// Sampling loop publishing host-process metrics under a configured prefix.
///
/// The loop is spawned on registration and samples immediately, so the first
/// scrape after startup already sees data. The task runs until the handle is
/// stopped or the process exits.
pub struct SourceCollector {
    handle: JoinHandle<()>,
    stopped: Arc<AtomicBool>,
}

impl SourceCollector {
    pub fn register(config: SourceConfig, host: HostHandle) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let stopped_task = stopped.clone();

        let mut labels = vec![Label::new("pid", host.pid().to_string())];
        for (key, value) in &config.labels {
            labels.push(Label::new(key.clone(), value.clone()));
        }

        let prefix = config.prefix.clone();
        let interval = Duration::from_secs(config.interval_secs);

        let handle = tokio::spawn(async move {
            debug!(
                "Source collector started for pid {} (prefix: {})",
                host.pid(),
                prefix
            );

            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if stopped_task.load(Ordering::Relaxed) {
                    debug!("Stopping source collector for pid {}", host.pid());
                    break;
                }

                match host.sample() {
                    Some(sample) => {
                        gauge!(format!("{}_cpu_percent", prefix), labels.clone())
                            .set(sample.cpu_percent);
                        gauge!(format!("{}_memory_bytes", prefix), labels.clone())
                            .set(sample.memory_bytes as f64);
                        gauge!(format!("{}_virtual_memory_bytes", prefix), labels.clone())
                            .set(sample.virtual_memory_bytes as f64);
                        gauge!(format!("{}_run_time_seconds", prefix), labels.clone())
                            .set(sample.run_time_seconds as f64);
                        counter!(format!("{}_disk_read_bytes_total", prefix), labels.clone())
                            .absolute(sample.disk_read_bytes);
                        counter!(format!("{}_disk_written_bytes_total", prefix), labels.clone())
                            .absolute(sample.disk_written_bytes);
                        gauge!(format!("{}_up", prefix), labels.clone()).set(1.0);
                    }
                    None => {
                        warn!("Host process {} is gone", host.pid());
                        gauge!(format!("{}_up", prefix), labels.clone()).set(0.0);
                    }
                }
            }
        });

        SourceCollector { handle, stopped }
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
        self.handle.abort();
    }
}
