//! Unified call facade over every adapter

use std::sync::Arc;
use std::time::Instant;

use futures_util::{StreamExt, future};
use prism_config::{LlmConfig, ProviderKind};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::LlmError;
use crate::pricing;
use crate::registry::AdapterRegistry;
use crate::routing::provider_from_model;
use crate::types::{ChatRequest, EventStream, Message, ModelConfig, StreamEvent, TextStream, TokenCost, TokenUsage};

/// Temperature used when the caller does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output token limit used when the caller does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Caller-facing request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model name; its prefix selects the vendor
    pub model: String,
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub const fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn to_chat_request(&self, provider: ProviderKind) -> ChatRequest {
        ChatRequest {
            messages: self.messages.clone(),
            model: ModelConfig {
                provider,
                model_name: self.model.clone(),
                temperature: Some(self.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
                max_tokens: Some(self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
            },
            system_prompt: self.system_prompt.clone(),
        }
    }
}

/// Result of a buffered call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    /// Concatenated deltas
    pub content: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Last usage reported by the vendor, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Present exactly when `usage` is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<TokenCost>,
    /// Wall time from dispatch to the terminal event
    pub latency_ms: u64,
}

/// Entry point for callers
///
/// Cheap to clone; the registry is shared.
#[derive(Clone)]
pub struct LlmClient {
    registry: Arc<AdapterRegistry>,
}

impl LlmClient {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Build a client with one adapter per configured vendor
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self::new(AdapterRegistry::from_config(config)?))
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Resolve the vendor and open the raw event stream
    ///
    /// Unknown models fail here before any adapter is touched.
    pub async fn events(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<(ProviderKind, EventStream), LlmError> {
        let provider = provider_from_model(&request.model)?;
        let adapter = self.registry.resolve(provider)?;

        tracing::debug!(provider = %provider, model = %request.model, "dispatching chat call");

        let events = adapter.chat(&request.to_chat_request(provider), cancel).await?;
        Ok((provider, events))
    }

    /// Buffered call: collect all deltas into one string
    ///
    /// An in-stream error discards the partial output and fails the call. A
    /// stream that ends without `Done` can only have been cancelled.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<CompletionResponse, LlmError> {
        let started = Instant::now();
        let (provider, mut events) = self.events(request, cancel).await?;

        let mut content = String::new();
        let mut usage = None;

        loop {
            match events.next().await {
                Some(StreamEvent::Delta(text)) => content.push_str(&text),
                Some(StreamEvent::Usage(reported)) => usage = Some(reported),
                Some(StreamEvent::Done) => break,
                Some(StreamEvent::Error(message)) => return Err(LlmError::Stream(message)),
                None => return Err(LlmError::Cancelled),
            }
        }

        let cost = usage
            .as_ref()
            .map(|usage| pricing::vendor_cost(provider, &request.model, usage));
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            provider = %provider,
            model = %request.model,
            tokens_in = usage.map(|usage| usage.tokens_in),
            tokens_out = usage.map(|usage| usage.tokens_out),
            total_tokens = usage.as_ref().map(TokenUsage::total),
            latency_ms,
            "completion finished"
        );

        Ok(CompletionResponse {
            content,
            provider,
            model: request.model.clone(),
            usage,
            cost,
            latency_ms,
        })
    }

    /// Streaming call: yield text fragments as they arrive
    ///
    /// A vendor error arrives as the final `Err` item, after any fragments
    /// already delivered. Cancellation simply ends the stream.
    pub async fn complete_stream(
        &self,
        request: &CompletionRequest,
        cancel: &CancellationToken,
    ) -> Result<TextStream, LlmError> {
        let (_, events) = self.events(request, cancel).await?;

        Ok(Box::pin(events.filter_map(|event| {
            future::ready(match event {
                StreamEvent::Delta(text) => Some(Ok(text)),
                StreamEvent::Error(message) => Some(Err(LlmError::Stream(message))),
                StreamEvent::Usage(_) | StreamEvent::Done => None,
            })
        })))
    }
}
