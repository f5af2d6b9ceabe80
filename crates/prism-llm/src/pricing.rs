//! Token usage to monetary cost

use prism_config::ProviderKind;

use crate::provider::gemini;
use crate::types::{TokenCost, TokenUsage};

/// Per-model prices in USD per million tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRow {
    /// Lower-case fragment looked up anywhere in the model name
    pub match_prefix: &'static str,
    /// Cost per million input tokens (USD)
    pub input_per_mtok: f64,
    /// Cost per million output tokens (USD)
    pub output_per_mtok: f64,
}

const fn row(match_prefix: &'static str, input_per_mtok: f64, output_per_mtok: f64) -> PricingRow {
    PricingRow {
        match_prefix,
        input_per_mtok,
        output_per_mtok,
    }
}

/// Pricing rows in match order; more specific fragments come first
pub const PRICING_TABLE: &[PricingRow] = &[
    // OpenAI
    row("gpt-5-nano", 0.05, 0.40),
    row("gpt-5-mini", 0.25, 2.00),
    row("gpt-5", 1.25, 10.00),
    row("gpt-4.1-nano", 0.10, 0.40),
    row("gpt-4.1-mini", 0.40, 1.60),
    row("gpt-4.1", 2.00, 8.00),
    row("gpt-4o-mini", 0.15, 0.60),
    row("gpt-4o", 2.50, 10.00),
    // Anthropic
    row("claude-opus-4-5", 5.00, 25.00),
    row("claude-opus", 15.00, 75.00),
    row("claude-3-opus", 15.00, 75.00),
    row("claude-sonnet", 3.00, 15.00),
    row("claude-3-5-sonnet", 3.00, 15.00),
    row("claude-haiku", 0.80, 4.00),
    row("claude-3-5-haiku", 0.80, 4.00),
    // Gemini
    row("gemini-3-pro", 2.00, 12.00),
    row("gemini-3-flash", 0.50, 3.00),
    row("gemini-2.5-pro", 1.25, 10.00),
    row("gemini-2.5-flash", 0.30, 2.50),
    row("gemini-2.0-flash", 0.10, 0.40),
    // xAI
    row("grok-code", 0.20, 1.50),
    row("grok-4-1-fast", 0.20, 0.50),
    row("grok-4-fast", 0.20, 0.50),
    row("grok-4", 3.00, 15.00),
    // DeepSeek
    row("deepseek", 0.28, 0.42),
    // Upstage
    row("solar-pro", 0.25, 0.25),
    row("solar", 0.15, 0.15),
];

/// Prices applied when no row matches
///
/// Unknown models are billed at this tier rather than rejected, so their
/// reported cost may be off in either direction.
pub const DEFAULT_PRICING: PricingRow = row("", 2.50, 10.00);

/// Local currency units per US dollar
pub const LOCAL_CURRENCY_PER_USD: f64 = 1400.0;

const USD_DECIMALS: i32 = 6;
const LOCAL_DECIMALS: i32 = 4;

/// First row whose fragment occurs in the lower-cased model name
pub fn pricing_for(model: &str) -> &'static PricingRow {
    let model = model.to_lowercase();
    PRICING_TABLE
        .iter()
        .find(|row| model.contains(row.match_prefix))
        .unwrap_or(&DEFAULT_PRICING)
}

/// Cost of one call
///
/// Only meaningful when the vendor reported usage; callers must not invent
/// a usage record to get a zero cost.
#[allow(clippy::cast_precision_loss)]
pub fn cost(model: &str, usage: &TokenUsage) -> TokenCost {
    let pricing = pricing_for(model);

    let usd = (usage.tokens_in as f64 / 1_000_000.0) * pricing.input_per_mtok
        + (usage.tokens_out as f64 / 1_000_000.0) * pricing.output_per_mtok;

    TokenCost {
        usd: round_to(usd, USD_DECIMALS),
        local_currency: round_to(usd * LOCAL_CURRENCY_PER_USD, LOCAL_DECIMALS),
    }
}

/// Cost of one call, priced on the model id the vendor actually served
///
/// Public aliases bill at their target's tier.
pub fn vendor_cost(provider: ProviderKind, model: &str, usage: &TokenUsage) -> TokenCost {
    let model = match provider {
        ProviderKind::Gemini => gemini::resolve_model(model),
        _ => model,
    };
    cost(model, usage)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
