pub mod server;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::warn;

pub use server::MetricsServer;

static RECORDER_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the process-wide Prometheus recorder and return its render handle.
///
/// The first call installs the recorder as the global `metrics` recorder;
/// every later call returns the same handle. All listeners render this one
/// handle, which is what makes the registry shared across endpoints.
pub fn install_recorder() -> PrometheusHandle {
    RECORDER_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                warn!("A global metrics recorder is already installed");
            }
            handle
        })
        .clone()
}
