//! Anthropic Messages API adapter

use async_trait::async_trait;
use prism_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{Adapter, Endpoint};
use crate::convert::anthropic::AnthropicTranslator;
use crate::error::LlmError;
use crate::protocol::anthropic::AnthropicRequest;
use crate::types::{ChatRequest, EventStream, Message, Role};

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default max tokens when not specified (Anthropic requires this field)
const DEFAULT_MAX_TOKENS: u32 = 16_384;

/// Anthropic adapter
pub struct AnthropicAdapter {
    endpoint: Endpoint,
}

impl AnthropicAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: Endpoint::new(ProviderKind::Anthropic, client, config)?,
        })
    }

    fn body(request: &ChatRequest) -> AnthropicRequest {
        // The system prompt has a dedicated field; stray system turns become user turns
        let messages = request
            .messages
            .iter()
            .map(|message| match message.role {
                Role::System => Message::user(message.content.clone()),
                _ => message.clone(),
            })
            .collect();

        AnthropicRequest {
            model: request.model.model_name.clone(),
            max_tokens: request.model.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: request.system_prompt().map(ToOwned::to_owned),
            messages,
            temperature: request.model.temperature,
            stream: true,
        }
    }
}

#[async_trait]
impl Adapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn chat(&self, request: &ChatRequest, cancel: &CancellationToken) -> Result<EventStream, LlmError> {
        let api_key = self.endpoint.api_key()?;

        let builder = self
            .endpoint
            .post("messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&Self::body(request));

        self.endpoint
            .stream(builder, AnthropicTranslator::default(), cancel)
            .await
    }
}
