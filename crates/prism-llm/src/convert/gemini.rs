//! Gemini frame translator

use super::FrameTranslator;
use crate::protocol::gemini::{GeminiCandidate, GeminiStreamFrame};
use crate::types::{StreamEvent, TokenUsage};

/// Gemini repeats running usage totals on every chunk and never sends a
/// final marker, so the latest non-empty totals are held until close
#[derive(Debug, Default)]
pub struct GeminiTranslator {
    latest_usage: Option<TokenUsage>,
}

impl FrameTranslator for GeminiTranslator {
    type Record = GeminiStreamFrame;

    fn translate(&mut self, record: GeminiStreamFrame) -> Vec<StreamEvent> {
        let chunk = match record {
            GeminiStreamFrame::Error { error } => return vec![StreamEvent::Error(error.message())],
            GeminiStreamFrame::Chunk(chunk) => chunk,
        };

        if let Some(usage) = chunk
            .usage_metadata
            .and_then(|usage| TokenUsage::from_counts(usage.prompt_token_count, usage.candidates_token_count))
        {
            self.latest_usage = Some(usage);
        }

        chunk
            .candidates
            .first()
            .map(GeminiCandidate::text)
            .filter(|text| !text.is_empty())
            .map(StreamEvent::Delta)
            .into_iter()
            .collect()
    }

    fn finish(&mut self) -> Vec<StreamEvent> {
        self.latest_usage.take().map(StreamEvent::Usage).into_iter().collect()
    }
}
