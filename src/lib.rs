pub mod agent;
pub mod collector;
pub mod config;
pub mod exporter;
pub mod host;
