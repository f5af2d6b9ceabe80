//! Google Gemini adapter

use async_trait::async_trait;
use prism_config::{ProviderConfig, ProviderKind};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{Adapter, Endpoint};
use crate::convert::gemini::GeminiTranslator;
use crate::error::LlmError;
use crate::protocol::gemini::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiSystemInstruction,
};
use crate::types::{ChatRequest, EventStream, Role};

/// Public names that differ from the vendor model identifier
const MODEL_ALIASES: &[(&str, &str)] = &[("gemini-3.0-flash", "gemini-3-flash-preview")];

/// Vendor model identifier for a public model name
pub fn resolve_model(model: &str) -> &str {
    MODEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == model)
        .map_or(model, |&(_, target)| target)
}

/// Gemini adapter
pub struct GeminiAdapter {
    endpoint: Endpoint,
}

impl GeminiAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: Endpoint::new(ProviderKind::Gemini, client, config)?,
        })
    }

    fn body(request: &ChatRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|message| GeminiContent {
                role: match message.role {
                    Role::Assistant => "model",
                    Role::System | Role::User => "user",
                }
                .to_owned(),
                parts: vec![GeminiPart::text(message.content.clone())],
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: request.system_prompt().map(|prompt| GeminiSystemInstruction {
                parts: vec![GeminiPart::text(prompt)],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: request.model.temperature,
                max_output_tokens: request.model.max_tokens,
            },
        }
    }
}

#[async_trait]
impl Adapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn chat(&self, request: &ChatRequest, cancel: &CancellationToken) -> Result<EventStream, LlmError> {
        let api_key = self.endpoint.api_key()?;
        let model = resolve_model(&request.model.model_name);

        let builder = self
            .endpoint
            .post(&format!("models/{model}:streamGenerateContent"))
            .query(&[("alt", "sse")])
            .header("x-goog-api-key", api_key)
            .json(&Self::body(request));

        self.endpoint
            .stream(builder, GeminiTranslator::default(), cancel)
            .await
    }
}
