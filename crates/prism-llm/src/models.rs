//! Catalogue of chat models offered per vendor

use prism_config::ProviderKind;
use serde::Serialize;

/// One selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub provider: ProviderKind,
}

const fn model(provider: ProviderKind, id: &'static str, display_name: &'static str) -> ModelInfo {
    ModelInfo {
        id,
        display_name,
        provider,
    }
}

/// Known chat models, grouped by vendor
pub const MODELS: &[ModelInfo] = &[
    model(ProviderKind::OpenAi, "gpt-5-2025-08-07", "GPT-5"),
    model(ProviderKind::OpenAi, "gpt-5.1-2025-11-13", "GPT-5.1"),
    model(ProviderKind::OpenAi, "gpt-5.2-2025-12-11", "GPT-5.2"),
    model(ProviderKind::OpenAi, "gpt-5-mini-2025-08-07", "GPT-5 Mini"),
    model(ProviderKind::OpenAi, "gpt-5-nano-2025-08-07", "GPT-5 Nano"),
    model(ProviderKind::OpenAi, "gpt-5-chat-latest", "GPT-5 Chat"),
    model(ProviderKind::OpenAi, "gpt-4.1-2025-04-14", "GPT-4.1"),
    model(ProviderKind::OpenAi, "gpt-4.1-mini-2025-04-14", "GPT-4.1 Mini"),
    model(ProviderKind::OpenAi, "gpt-4.1-nano-2025-04-14", "GPT-4.1 Nano"),
    model(ProviderKind::OpenAi, "chatgpt-4o-latest", "GPT-4o (Latest)"),
    model(ProviderKind::OpenAi, "gpt-4o", "GPT-4o"),
    model(ProviderKind::OpenAi, "gpt-4o-mini", "GPT-4o Mini"),
    model(ProviderKind::Anthropic, "claude-sonnet-4-5-20250929", "Claude Sonnet 4.5"),
    model(ProviderKind::Anthropic, "claude-opus-4-5-20251101", "Claude Opus 4.5"),
    model(ProviderKind::Anthropic, "claude-3-5-sonnet-20241022", "Claude Sonnet 3.5"),
    model(ProviderKind::Anthropic, "claude-3-5-haiku-20241022", "Claude Haiku 3.5"),
    model(ProviderKind::Anthropic, "claude-3-opus-20240229", "Claude Opus 3"),
    model(ProviderKind::Gemini, "gemini-2.5-pro", "Gemini 2.5 Pro"),
    model(ProviderKind::Gemini, "gemini-3-pro-preview", "Gemini 3 Pro"),
    model(ProviderKind::Gemini, "gemini-3-flash-preview", "Gemini 3 Flash Preview"),
    model(ProviderKind::Gemini, "gemini-2.0-flash", "Gemini 2 Flash"),
    model(ProviderKind::Xai, "grok-4", "Grok 4"),
    model(ProviderKind::Xai, "grok-4-fast", "Grok 4 Fast"),
    model(ProviderKind::Xai, "grok-4-fast-reasoning", "Grok 4 Reasoning"),
    model(ProviderKind::Xai, "grok-4-fast-non-reasoning", "Grok 4 Non-Reasoning"),
    model(ProviderKind::Xai, "grok-4-1-fast-reasoning", "Grok 4.1 Reasoning"),
    model(ProviderKind::Xai, "grok-4-1-fast-non-reasoning", "Grok 4.1 Non-Reasoning"),
    model(ProviderKind::Xai, "grok-code-fast-1-0825", "Grok Code"),
    model(ProviderKind::DeepSeek, "deepseek-chat", "DeepSeek Chat"),
    model(ProviderKind::DeepSeek, "deepseek-reasoner", "DeepSeek Reasoner"),
    model(ProviderKind::Solar, "solar-pro", "Solar Pro"),
    model(ProviderKind::Solar, "solar-pro2", "Solar Pro 2"),
];

/// Models offered by one vendor, in catalogue order
pub fn models_for(provider: ProviderKind) -> impl Iterator<Item = &'static ModelInfo> {
    MODELS.iter().filter(move |info| info.provider == provider)
}

/// Catalogue entry for an exact model id
pub fn find(model: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|info| info.id == model)
}

/// Human-readable name, or the id itself for uncatalogued models
pub fn display_name(model: &str) -> &str {
    find(model).map_or(model, |info| info.display_name)
}
