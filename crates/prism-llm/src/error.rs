use prism_config::ProviderKind;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// No entry in the model prefix table matched the requested model
    #[error("unknown model provider for: {model}")]
    UnknownModel { model: String },

    /// No adapter is registered for the provider
    #[error("provider not found: {provider}")]
    ProviderNotFound { provider: String },

    /// Credential for the provider is not configured
    #[error("{provider} credential missing: set {variable}")]
    MissingCredential {
        provider: ProviderKind,
        variable: &'static str,
    },

    /// Upstream provider answered with a non-success status
    #[error("{provider} returned {status}: {body}")]
    Upstream {
        provider: ProviderKind,
        status: u16,
        /// Response body, surfaced verbatim as the error detail
        body: String,
    },

    /// Connection to the provider failed before streaming began
    #[error("{provider} request failed: {message}")]
    Transport { provider: ProviderKind, message: String },

    /// Provider reported an error in the middle of the stream
    #[error("streaming error: {0}")]
    Stream(String),

    /// Caller cancelled the call before it completed
    #[error("request cancelled")]
    Cancelled,

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse classification of an [`LlmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised before any network I/O: unknown model, provider or credential
    Configuration,
    /// Non-success status or connection failure before streaming
    Transport,
    /// In-stream error frame from the vendor
    Protocol,
    /// Cancelled by the caller
    Cancelled,
    /// Bug or unexpected condition
    Internal,
}

impl LlmError {
    /// Which part of the error taxonomy this error belongs to
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownModel { .. } | Self::ProviderNotFound { .. } | Self::MissingCredential { .. } => {
                ErrorKind::Configuration
            }
            Self::Upstream { .. } | Self::Transport { .. } => ErrorKind::Transport,
            Self::Stream(_) => ErrorKind::Protocol,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether a caller-side retry could plausibly succeed
    ///
    /// Nothing in this crate retries on its own; this only informs callers
    /// that implement their own policy.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } | Self::Stream(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_not_retryable() {
        let errors = [
            LlmError::UnknownModel {
                model: "llama-3".to_owned(),
            },
            LlmError::ProviderNotFound {
                provider: "mistral".to_owned(),
            },
            LlmError::MissingCredential {
                provider: ProviderKind::Xai,
                variable: "XAI_API_KEY",
            },
        ];

        for error in errors {
            assert_eq!(error.kind(), ErrorKind::Configuration);
            assert!(!error.is_retryable());
        }
    }

    #[test]
    fn upstream_retryability_depends_on_status() {
        let upstream = |status| LlmError::Upstream {
            provider: ProviderKind::OpenAi,
            status,
            body: String::new(),
        };

        assert!(upstream(503).is_retryable());
        assert!(upstream(429).is_retryable());
        assert!(!upstream(401).is_retryable());
        assert_eq!(upstream(400).kind(), ErrorKind::Transport);
    }

    #[test]
    fn messages_carry_the_detail() {
        let err = LlmError::Upstream {
            provider: ProviderKind::Anthropic,
            status: 400,
            body: "{\"error\":\"bad\"}".to_owned(),
        };
        assert_eq!(err.to_string(), "anthropic returned 400: {\"error\":\"bad\"}");

        let err = LlmError::MissingCredential {
            provider: ProviderKind::Gemini,
            variable: "GEMINI_API_KEY",
        };
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
