use anyhow::Result;
use axum::http::header;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::config::{resolve_address, BindAddress};

// --- Constants ---
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// One running metrics listener.
///
/// The accept loop runs in a background task, so a started server never
/// blocks process exit. Aborting the task is the only teardown; whoever owns
/// the handle owns the listener's lifetime.
pub struct MetricsServer {
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MetricsServer {
    /// Bind the endpoint and start serving the shared registry.
    pub async fn start(address: &BindAddress, registry: PrometheusHandle) -> Result<Self> {
        let addr = resolve_address(address.to_string()).await?;
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let app = Router::new().route("/", get(landing)).route(
            "/metrics",
            get(move || {
                let registry = registry.clone();
                async move { ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], registry.render()) }
            }),
        );

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Metrics listener on {} failed: {}", local_addr, e);
            }
        });
        debug!("Metrics listener bound on {}", local_addr);

        Ok(MetricsServer { local_addr, handle })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

async fn landing() -> Html<&'static str> {
    Html(concat!(
        "<html><head><title>Tamarin exporter</title></head>",
        "<body><h1>Tamarin exporter</h1>",
        "<p><a href=\"/metrics\">Metrics</a></p>",
        "</body></html>"
    ))
}
