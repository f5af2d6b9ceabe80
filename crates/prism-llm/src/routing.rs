//! Provider resolution from model names

use prism_config::ProviderKind;

use crate::error::LlmError;

/// Model name prefixes in match order; first match wins
pub const MODEL_PREFIXES: &[(&str, ProviderKind)] = &[
    ("gpt-", ProviderKind::OpenAi),
    ("chatgpt-", ProviderKind::OpenAi),
    ("claude-", ProviderKind::Anthropic),
    ("gemini-", ProviderKind::Gemini),
    ("imagen-", ProviderKind::Gemini),
    ("grok-", ProviderKind::Xai),
    ("deepseek-", ProviderKind::DeepSeek),
    ("solar-", ProviderKind::Solar),
];

/// Vendor serving a model, by case-sensitive prefix
///
/// # Errors
///
/// Returns `UnknownModel` when no prefix matches
pub fn provider_from_model(model: &str) -> Result<ProviderKind, LlmError> {
    MODEL_PREFIXES
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|&(_, kind)| kind)
        .ok_or_else(|| LlmError::UnknownModel {
            model: model.to_owned(),
        })
}
