use serde::{Deserialize, Serialize};

/// Vendor-reported token counts for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Prompt tokens
    pub tokens_in: u64,
    /// Completion tokens
    pub tokens_out: u64,
}

impl TokenUsage {
    /// Build from optional vendor counts
    ///
    /// Returns `None` when both counts are zero or absent: vendors send
    /// zeroed usage objects before they know the real numbers.
    pub fn from_counts(tokens_in: Option<u64>, tokens_out: Option<u64>) -> Option<Self> {
        let usage = Self {
            tokens_in: tokens_in.unwrap_or(0),
            tokens_out: tokens_out.unwrap_or(0),
        };

        (usage.tokens_in > 0 || usage.tokens_out > 0).then_some(usage)
    }

    /// Sum of input and output tokens
    pub const fn total(&self) -> u64 {
        self.tokens_in + self.tokens_out
    }
}

/// Monetary cost of one call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCost {
    /// Cost in US dollars
    pub usd: f64,
    /// Cost converted at the static exchange rate
    pub local_currency: f64,
}
