//! `OpenAI` chat completions and Responses API wire format types
//!
//! The chat completions shapes double as the wire format of every
//! OpenAI-compatible vendor (xAI, `DeepSeek`, Solar).

use serde::{Deserialize, Serialize};

use super::ErrorDetail;
use crate::types::Message;

// -- Chat completions --

/// Chat completions request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation, system prompt first
    pub messages: Vec<Message>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Output limit (current `OpenAI` name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Output limit (name used by compatible vendors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Always true for this crate
    pub stream: bool,
    /// Ask for a trailing usage chunk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<OpenAiStreamOptions>,
}

/// Stream options for chat completions
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiStreamOptions {
    pub include_usage: bool,
}

/// One decoded chat completions frame
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenAiStreamFrame {
    /// Vendor error reported mid-stream
    Error { error: ErrorDetail },
    /// Regular chunk
    Chunk(OpenAiStreamChunk),
}

/// Streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChunk {
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
    /// Present on the final chunk when usage was requested
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChoice {
    #[serde(default)]
    pub delta: OpenAiStreamDelta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiStreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token counts in chat completions format
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}

// -- Responses API --

/// Responses API request
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    /// Conversation without the system prompt
    pub input: Vec<Message>,
    /// System prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    pub stream: bool,
}

/// Responses API stream event, discriminated by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ResponsesStreamEvent {
    /// Incremental output text
    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta {
        #[serde(default)]
        delta: String,
    },
    /// Response finished; carries final usage
    #[serde(rename = "response.completed", alias = "response.done")]
    Completed {
        #[serde(default)]
        response: Option<ResponsesBody>,
    },
    /// Response ended in failure
    #[serde(rename = "response.failed")]
    Failed {
        #[serde(default)]
        response: Option<ResponsesBody>,
    },
    /// Stream-level error
    #[serde(rename = "error", alias = "response.error")]
    Error {
        #[serde(default)]
        error: Option<ErrorDetail>,
        #[serde(default)]
        message: Option<String>,
    },
    /// Lifecycle events without text (`response.created`, ...)
    #[serde(other)]
    Other,
}

/// Response object embedded in lifecycle events
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesBody {
    #[serde(default)]
    pub usage: Option<ResponsesUsage>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Token counts in Responses API format
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
}
