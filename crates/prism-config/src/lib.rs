//! Configuration for prism
//!
//! Per-vendor credentials and endpoint overrides, loaded either from a TOML
//! file with `{{ env.VAR }}` placeholders or straight from the environment.

#![allow(clippy::must_use_candidate)]

mod env;
pub mod llm;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use env::EnvError;
pub use llm::{LlmConfig, ProviderConfig, ProviderKind};
pub use telemetry::TelemetryConfig;

/// Top-level prism configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Vendor credentials and endpoints
    #[serde(default)]
    pub llm: LlmConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
