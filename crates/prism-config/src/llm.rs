use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Upstream chat vendors prism can talk to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// `OpenAI` chat completions and Responses API
    OpenAi,
    /// Anthropic Messages API
    Anthropic,
    /// Google Gemini generative language API
    Gemini,
    /// xAI Grok (OpenAI-compatible)
    Xai,
    /// `DeepSeek` (OpenAI-compatible)
    DeepSeek,
    /// Upstage Solar (OpenAI-compatible)
    Solar,
}

impl ProviderKind {
    /// Every supported vendor, in registration order
    pub const ALL: [Self; 6] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::Gemini,
        Self::Xai,
        Self::DeepSeek,
        Self::Solar,
    ];

    /// Environment variable holding the vendor credential
    pub const fn credential_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Xai => "XAI_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Solar => "SOLAR_API_KEY",
        }
    }

    /// Environment variable overriding the vendor base URL
    pub const fn base_url_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_BASE_URL",
            Self::Anthropic => "ANTHROPIC_BASE_URL",
            Self::Gemini => "GEMINI_BASE_URL",
            Self::Xai => "XAI_BASE_URL",
            Self::DeepSeek => "DEEPSEEK_BASE_URL",
            Self::Solar => "SOLAR_BASE_URL",
        }
    }

    /// Public API base URL used when no override is configured
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Xai => "https://api.x.ai/v1",
            Self::DeepSeek => "https://api.deepseek.com/v1",
            Self::Solar => "https://api.upstage.ai/v1/solar",
        }
    }
}

/// Per-vendor LLM configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub anthropic: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub xai: ProviderConfig,
    #[serde(default)]
    pub deepseek: ProviderConfig,
    #[serde(default)]
    pub solar: ProviderConfig,
}

impl LlmConfig {
    /// Settings for one vendor
    pub const fn provider(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Xai => &self.xai,
            ProviderKind::DeepSeek => &self.deepseek,
            ProviderKind::Solar => &self.solar,
        }
    }

    /// Mutable settings for one vendor
    pub const fn provider_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Anthropic => &mut self.anthropic,
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::Xai => &mut self.xai,
            ProviderKind::DeepSeek => &mut self.deepseek,
            ProviderKind::Solar => &mut self.solar,
        }
    }
}

/// Credential and endpoint for a single vendor
///
/// Both fields are optional: a missing key only fails calls routed to this
/// vendor, and a missing base URL falls back to the vendor's public API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key sent as bearer token or vendor-specific header
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (proxies, self-hosted gateways, tests)
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl ProviderConfig {
    /// Config with only a credential set
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            base_url: None,
        }
    }

    /// Replace the base URL
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}
