//! Provider identifier to adapter mapping

use std::collections::HashMap;
use std::sync::Arc;

use prism_config::{LlmConfig, ProviderKind};
use reqwest::Client;

use crate::error::LlmError;
use crate::provider::Adapter;
use crate::provider::anthropic::AnthropicAdapter;
use crate::provider::compatible::CompatibleAdapter;
use crate::provider::gemini::GeminiAdapter;
use crate::provider::openai::OpenAiAdapter;

/// Immutable map from vendor to adapter, built once at startup
///
/// Every vendor gets an adapter even without a credential; the missing
/// credential surfaces when a call is routed to it.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<ProviderKind, Arc<dyn Adapter>>,
}

impl AdapterRegistry {
    /// Build one adapter per vendor sharing a single HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter cannot be constructed
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::new();
        let mut adapters: HashMap<ProviderKind, Arc<dyn Adapter>> = HashMap::new();

        for kind in ProviderKind::ALL {
            let provider_config = config.provider(kind);
            let adapter: Arc<dyn Adapter> = match kind {
                ProviderKind::OpenAi => Arc::new(OpenAiAdapter::new(client.clone(), provider_config)?),
                ProviderKind::Anthropic => Arc::new(AnthropicAdapter::new(client.clone(), provider_config)?),
                ProviderKind::Gemini => Arc::new(GeminiAdapter::new(client.clone(), provider_config)?),
                ProviderKind::Xai => Arc::new(CompatibleAdapter::xai(client.clone(), provider_config)?),
                ProviderKind::DeepSeek => Arc::new(CompatibleAdapter::deepseek(client.clone(), provider_config)?),
                ProviderKind::Solar => Arc::new(CompatibleAdapter::solar(client.clone(), provider_config)?),
            };

            tracing::debug!(
                provider = %kind,
                credential = provider_config.api_key.is_some(),
                "registered adapter"
            );
            adapters.insert(kind, adapter);
        }

        Ok(Self { adapters })
    }

    /// Build from an explicit adapter list; later entries replace earlier ones
    pub fn from_adapters(adapters: impl IntoIterator<Item = Arc<dyn Adapter>>) -> Self {
        Self {
            adapters: adapters
                .into_iter()
                .map(|adapter| (adapter.kind(), adapter))
                .collect(),
        }
    }

    /// Adapter for a vendor
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotFound` if no adapter is registered
    pub fn resolve(&self, kind: ProviderKind) -> Result<Arc<dyn Adapter>, LlmError> {
        self.adapters
            .get(&kind)
            .cloned()
            .ok_or_else(|| LlmError::ProviderNotFound {
                provider: kind.to_string(),
            })
    }

    /// Adapter for a vendor given by its wire name (`"openai"`, ...)
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotFound` for unknown names or unregistered vendors
    pub fn resolve_name(&self, name: &str) -> Result<Arc<dyn Adapter>, LlmError> {
        let kind = name.parse::<ProviderKind>().map_err(|_| LlmError::ProviderNotFound {
            provider: name.to_owned(),
        })?;
        self.resolve(kind)
    }

    /// Registered vendors in stable order
    pub fn providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.adapters.contains_key(kind))
            .collect()
    }
}
