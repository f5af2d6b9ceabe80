use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, e.g. `"prism_llm=debug,info"`
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Emit JSON log lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}
