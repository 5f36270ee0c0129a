use anyhow::Result;
use tracing::{debug, error, info, trace};

use crate::collector::{build_info, process, SourceCollector};
use crate::config::{self, parse_endpoint_configs};
use crate::exporter::{self, MetricsServer};
use crate::host::HostHandle;

// Bind to all interfaces by default.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

const USAGE: &str = "Usage: tamarin [host:]<port>:<collector config file>";

/// Everything the bootstrap started, owned by the host runtime.
///
/// Dropping the handle detaches the background tasks; `shutdown` stops them.
pub struct Agent {
    pub servers: Vec<MetricsServer>,
    pub collectors: Vec<SourceCollector>,
}

impl Agent {
    pub fn shutdown(self) {
        for collector in &self.collectors {
            collector.stop();
        }
        for server in &self.servers {
            server.shutdown();
        }
    }
}

/// Entry point for attachment at host-process startup.
pub async fn attach(args: &str, host: HostHandle) -> Result<Agent> {
    start(args, host).await
}

/// Entry point for dynamic attachment to an already-running process.
/// Same contract as [`attach`].
pub async fn attach_running(args: &str, host: HostHandle) -> Result<Agent> {
    start(args, host).await
}

async fn start(args: &str, host: HostHandle) -> Result<Agent> {
    trace!("Agent bootstrap");
    trace!("{:?}", args);

    // A bad endpoint string is the one fatal condition: print the usage line
    // and exit, whatever the host process was doing.
    let endpoints = match parse_endpoint_configs(args, DEFAULT_BIND_HOST) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("Invalid endpoint configuration: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let registry = exporter::install_recorder();

    let mut servers = Vec::with_capacity(endpoints.len());
    let mut collectors = Vec::with_capacity(endpoints.len());
    for endpoint in &endpoints {
        debug!("Starting endpoint {}", endpoint.address);

        build_info::register();

        let source = config::load_source_config(&endpoint.source_file)?;
        collectors.push(SourceCollector::register(source, host.clone()));

        process::initialize();

        let server = MetricsServer::start(&endpoint.address, registry.clone()).await?;
        info!("Metrics endpoint listening on {}", server.local_addr());
        servers.push(server);
    }

    Ok(Agent {
        servers,
        collectors,
    })
}
