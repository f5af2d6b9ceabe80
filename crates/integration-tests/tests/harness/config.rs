//! Vendor configuration pointing at a mock

use prism_config::{LlmConfig, ProviderConfig, ProviderKind};
use prism_llm::LlmClient;
use url::Url;

pub const TEST_KEY: &str = "test-key";

/// Configuration routing one vendor to `base_url`
pub fn vendor_config(kind: ProviderKind, base_url: &str, api_key: Option<&str>) -> LlmConfig {
    let mut config = LlmConfig::default();
    let mut provider = api_key.map_or_else(ProviderConfig::default, ProviderConfig::with_api_key);
    provider = provider.base_url(Url::parse(base_url).unwrap());
    *config.provider_mut(kind) = provider;
    config
}

/// Client whose `kind` vendor talks to `base_url` with a test credential
pub fn client_for(kind: ProviderKind, base_url: &str) -> LlmClient {
    LlmClient::from_config(&vendor_config(kind, base_url, Some(TEST_KEY))).unwrap()
}
