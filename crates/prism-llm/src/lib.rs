//! Streaming adapter layer for prism
//!
//! Normalises the chat APIs of `OpenAI`, Anthropic, Google Gemini, xAI,
//! `DeepSeek` and Upstage Solar into one ordered event protocol, and offers
//! buffered and streaming completions with per-call cost accounting on top.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod convert;
pub mod error;
pub mod models;
pub mod pricing;
pub mod protocol;
pub mod provider;
pub mod registry;
pub mod routing;
pub mod sse;
pub mod types;

pub use client::{CompletionRequest, CompletionResponse, LlmClient};
pub use error::{ErrorKind, LlmError};
pub use pricing::cost;
pub use provider::Adapter;
pub use registry::AdapterRegistry;
pub use routing::provider_from_model;
pub use sse::encode_sse;
pub use types::{Message, Role, StreamEvent, TokenCost, TokenUsage};
