use prism_config::ProviderKind;
use serde::{Deserialize, Serialize};

/// Role of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Model selection and sampling parameters for one call
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Vendor derived from the model name
    pub provider: ProviderKind,
    /// Vendor model identifier, e.g. `gpt-4o-mini`
    pub model_name: String,
    /// Sampling temperature, dropped for models that reject it
    pub temperature: Option<f64>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

/// Everything an adapter needs to issue one streaming chat call
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<Message>,
    /// Target model
    pub model: ModelConfig,
    /// Instructions merged in per vendor convention
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    /// System prompt, treating an empty string as absent
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|prompt| !prompt.is_empty())
    }
}
