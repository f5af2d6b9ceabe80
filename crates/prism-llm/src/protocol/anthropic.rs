//! Anthropic Messages API wire format types

use serde::{Deserialize, Serialize};

use super::ErrorDetail;
use crate::types::Message;

// -- Request types --

/// Anthropic messages API request
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate (required by Anthropic)
    pub max_tokens: u32,
    /// System prompt (top-level, not in messages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversation messages; only `user` and `assistant` roles
    pub messages: Vec<Message>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Whether to stream the response
    pub stream: bool,
}

// -- Streaming types --

/// Anthropic SSE event types
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    /// Stream started; carries input token count
    MessageStart { message: AnthropicStreamMessage },
    /// Incremental content within a block
    ContentBlockDelta { delta: AnthropicStreamDelta },
    /// Top-level message update; carries output token count
    MessageDelta {
        #[serde(default)]
        usage: Option<AnthropicUsage>,
    },
    /// Stream completed
    MessageStop,
    /// Error reported mid-stream
    Error { error: ErrorDetail },
    /// `ping`, `content_block_start`, `content_block_stop`
    #[serde(other)]
    Other,
}

/// Message metadata sent with `message_start`
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicStreamMessage {
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Delta payload within `content_block_delta`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamDelta {
    /// Incremental text
    TextDelta { text: String },
    /// Tool input or thinking deltas, which carry no output text
    #[serde(other)]
    Other,
}

/// Token counts reported by Anthropic
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
}
