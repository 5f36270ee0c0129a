pub mod endpoint;
pub mod source;

use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::lookup_host;

pub use endpoint::{parse_endpoint_configs, BindAddress, ConfigError, EndpointConfig};
pub use source::{load_source_config, SourceConfig};

// --- Shared utilities ---
pub async fn resolve_address(address: String) -> Result<SocketAddr> {
    match lookup_host(&address).await?.next() {
        Some(addr) => Ok(addr),
        None => anyhow::bail!("Failed to resolve address: {}", address),
    }
}
