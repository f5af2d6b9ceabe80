//! Vendor wire formats
//!
//! Request bodies are `Serialize`-only; stream frames are decoded into one
//! tagged enum per vendor so the translators can match exhaustively.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use serde::Deserialize;

/// Error payload as vendors embed it in stream frames
///
/// Some send a bare string, most send an object with a `message`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

impl ErrorDetail {
    /// Human-readable message, falling back to the error type
    pub fn message(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Object { message: Some(message), .. } => message.clone(),
            Self::Object { kind: Some(kind), .. } => kind.clone(),
            Self::Object { .. } => "unknown error".to_owned(),
        }
    }
}
