//! `OpenAI` adapter (chat completions and Responses API)

use async_trait::async_trait;
use prism_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{Adapter, Endpoint, with_system_message};
use crate::convert::openai::{ChatChunkTranslator, ResponsesTranslator};
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiChatRequest, OpenAiStreamOptions, ResponsesRequest};
use crate::types::{ChatRequest, EventStream};

/// Whether a model is served through `/responses` instead of
/// `/chat/completions`
///
/// GPT-5 reasoning models only stream through the Responses API; their
/// `-chat` variants still speak chat completions.
pub fn uses_responses_api(model: &str) -> bool {
    let model = model.to_lowercase();
    model.starts_with("gpt-5") && !model.contains("chat")
}

/// Responses API models whose small variants reject `temperature`
fn responses_accepts_temperature(model: &str) -> bool {
    let model = model.to_lowercase();
    !model.contains("mini") && !model.contains("nano")
}

/// `OpenAI` adapter
pub struct OpenAiAdapter {
    endpoint: Endpoint,
}

impl OpenAiAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: Endpoint::new(ProviderKind::OpenAi, client, config)?,
        })
    }

    fn chat_body(request: &ChatRequest) -> OpenAiChatRequest {
        OpenAiChatRequest {
            model: request.model.model_name.clone(),
            messages: with_system_message(request),
            temperature: request.model.temperature,
            max_completion_tokens: request.model.max_tokens,
            max_tokens: None,
            stream: true,
            stream_options: Some(OpenAiStreamOptions { include_usage: true }),
        }
    }

    fn responses_body(request: &ChatRequest) -> ResponsesRequest {
        let model = &request.model.model_name;

        ResponsesRequest {
            model: model.clone(),
            input: request.messages.clone(),
            instructions: request.system_prompt().map(ToOwned::to_owned),
            temperature: request
                .model
                .temperature
                .filter(|_| responses_accepts_temperature(model)),
            max_output_tokens: request.model.max_tokens,
            stream: true,
        }
    }
}

#[async_trait]
impl Adapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn chat(&self, request: &ChatRequest, cancel: &CancellationToken) -> Result<EventStream, LlmError> {
        let api_key = self.endpoint.api_key()?;

        if uses_responses_api(&request.model.model_name) {
            let builder = self
                .endpoint
                .post("responses")
                .bearer_auth(api_key)
                .json(&Self::responses_body(request));

            self.endpoint.stream(builder, ResponsesTranslator, cancel).await
        } else {
            let builder = self
                .endpoint
                .post("chat/completions")
                .bearer_auth(api_key)
                .json(&Self::chat_body(request));

            self.endpoint
                .stream(builder, ChatChunkTranslator::default(), cancel)
                .await
        }
    }
}
