//! Adapter for vendors speaking the `OpenAI` chat completions dialect

use async_trait::async_trait;
use prism_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{Adapter, Endpoint, with_system_message};
use crate::convert::openai::ChatChunkTranslator;
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiChatRequest, OpenAiStreamOptions};
use crate::types::{ChatRequest, EventStream};

/// Per-vendor differences within the compatible dialect
#[derive(Debug, Clone, Copy)]
pub struct CompatibleProfile {
    /// Vendor identity
    pub kind: ProviderKind,
    /// Send `stream_options.include_usage`
    pub stream_usage: bool,
    /// Whether the model accepts a `temperature` parameter
    pub accepts_temperature: fn(&str) -> bool,
}

const fn any_model(_model: &str) -> bool {
    true
}

fn deepseek_accepts_temperature(model: &str) -> bool {
    // deepseek-reasoner ignores sampling parameters and rejects some of them
    !model.contains("reasoner")
}

impl CompatibleProfile {
    pub const XAI: Self = Self {
        kind: ProviderKind::Xai,
        stream_usage: true,
        accepts_temperature: any_model,
    };

    pub const DEEPSEEK: Self = Self {
        kind: ProviderKind::DeepSeek,
        stream_usage: false,
        accepts_temperature: deepseek_accepts_temperature,
    };

    pub const SOLAR: Self = Self {
        kind: ProviderKind::Solar,
        stream_usage: false,
        accepts_temperature: any_model,
    };
}

/// OpenAI-compatible chat completions adapter (xAI, `DeepSeek`, Solar)
pub struct CompatibleAdapter {
    endpoint: Endpoint,
    profile: CompatibleProfile,
}

impl CompatibleAdapter {
    pub fn new(profile: CompatibleProfile, client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: Endpoint::new(profile.kind, client, config)?,
            profile,
        })
    }

    pub fn xai(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Self::new(CompatibleProfile::XAI, client, config)
    }

    pub fn deepseek(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Self::new(CompatibleProfile::DEEPSEEK, client, config)
    }

    pub fn solar(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Self::new(CompatibleProfile::SOLAR, client, config)
    }

    fn body(&self, request: &ChatRequest) -> OpenAiChatRequest {
        let model = &request.model.model_name;

        OpenAiChatRequest {
            model: model.clone(),
            messages: with_system_message(request),
            temperature: request
                .model
                .temperature
                .filter(|_| (self.profile.accepts_temperature)(model)),
            max_completion_tokens: None,
            max_tokens: request.model.max_tokens,
            stream: true,
            stream_options: self
                .profile
                .stream_usage
                .then_some(OpenAiStreamOptions { include_usage: true }),
        }
    }
}

#[async_trait]
impl Adapter for CompatibleAdapter {
    fn kind(&self) -> ProviderKind {
        self.profile.kind
    }

    async fn chat(&self, request: &ChatRequest, cancel: &CancellationToken) -> Result<EventStream, LlmError> {
        let api_key = self.endpoint.api_key()?;

        let builder = self
            .endpoint
            .post("chat/completions")
            .bearer_auth(api_key)
            .json(&self.body(request));

        self.endpoint
            .stream(builder, ChatChunkTranslator::default(), cancel)
            .await
    }
}
