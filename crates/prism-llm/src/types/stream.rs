use std::pin::Pin;

use futures_util::Stream;
use serde::{Deserialize, Serialize};

use super::TokenUsage;
use crate::error::LlmError;

/// Normalised event produced by every adapter
///
/// Serialises as `{"type": "...", "data": ...}` so it can be relayed to a
/// browser as-is. An error carries its message as `{"error": "..."}` under
/// `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Incremental generated text
    Delta(String),
    /// Token counts reported by the vendor
    Usage(TokenUsage),
    /// Generation finished normally
    Done,
    /// Vendor reported an error mid-stream
    Error(#[serde(with = "error_payload")] String),
}

impl StreamEvent {
    /// Whether the event ends the call; nothing follows a terminal event
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }
}

mod error_payload {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Outgoing<'a> {
        error: &'a str,
    }

    #[derive(Deserialize)]
    struct Incoming {
        error: String,
    }

    pub fn serialize<S: Serializer>(message: &str, serializer: S) -> Result<S::Ok, S::Error> {
        Outgoing { error: message }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Incoming::deserialize(deserializer).map(|payload| payload.error)
    }
}

/// Lazy, cancellable sequence of normalised events for one call
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Lazy sequence of text fragments as exposed by the streaming facade
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;
