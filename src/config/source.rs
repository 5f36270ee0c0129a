use anyhow::Result;
use config::Config;
use std::collections::HashMap;
use std::path::Path;

// --- Constants ---
const DEFAULT_SOURCE_PREFIX: &str = "host_process";
const DEFAULT_SOURCE_INTERVAL_SECS: u64 = 15;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_prefix")]
    pub prefix: String,
    #[serde(default = "default_source_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

pub fn default_source_prefix() -> String {
    DEFAULT_SOURCE_PREFIX.to_string()
}

pub fn default_source_interval_secs() -> u64 {
    DEFAULT_SOURCE_INTERVAL_SECS
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            prefix: default_source_prefix(),
            interval_secs: default_source_interval_secs(),
            labels: HashMap::new(),
        }
    }
}

impl SourceConfig {
    /// Validates and normalizes the configuration, setting defaults for zero values
    pub fn validate_and_normalize(&mut self) {
        if self.prefix.is_empty() {
            self.prefix = default_source_prefix();
        }
        if self.interval_secs == 0 {
            self.interval_secs = default_source_interval_secs();
        }
    }
}

/// Load the collector resource named by an endpoint's `path` component.
pub fn load_source_config(config_path: &Path) -> Result<SourceConfig> {
    let config_source = Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("TAMARIN").separator("__"))
        .build()?;

    let mut config: SourceConfig = config_source.try_deserialize()?;
    config.validate_and_normalize();

    Ok(config)
}
