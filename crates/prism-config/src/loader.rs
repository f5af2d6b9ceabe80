use std::path::Path;

use secrecy::SecretString;
use url::Url;

use crate::{Config, LlmConfig, ProviderKind};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if placeholder expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration purely from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a `*_BASE_URL` override is not a valid URL
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            llm: LlmConfig::from_env()?,
            telemetry: crate::TelemetryConfig::default(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing credentials are deliberately not an error here: they fail the
    /// individual call that needs them.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL uses a scheme other than http or https
    pub fn validate(&self) -> anyhow::Result<()> {
        for kind in ProviderKind::ALL {
            if let Some(base_url) = &self.llm.provider(kind).base_url
                && !matches!(base_url.scheme(), "http" | "https")
            {
                anyhow::bail!("base_url for provider '{kind}' must use http or https, got '{base_url}'");
            }
        }

        Ok(())
    }
}

impl LlmConfig {
    /// Read `<VENDOR>_API_KEY` and `<VENDOR>_BASE_URL` for every vendor
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL override cannot be parsed
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kind in ProviderKind::ALL {
            let provider = config.provider_mut(kind);
            provider.api_key = read_var(kind.credential_var()).map(SecretString::from);

            if let Some(raw) = read_var(kind.base_url_var()) {
                let url = Url::parse(&raw)
                    .map_err(|e| anyhow::anyhow!("invalid {}: {e}", kind.base_url_var()))?;
                provider.base_url = Some(url);
            }
        }

        Ok(config)
    }
}

/// Read a variable, treating empty values as unset
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
