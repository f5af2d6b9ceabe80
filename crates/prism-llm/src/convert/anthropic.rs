//! Anthropic frame translator

use super::FrameTranslator;
use crate::protocol::anthropic::{AnthropicStreamDelta, AnthropicStreamEvent, AnthropicUsage};
use crate::types::{StreamEvent, TokenUsage};

/// Combines input tokens from `message_start` with output tokens from
/// `message_delta` and emits one usage event before `Done`
#[derive(Debug, Default)]
pub struct AnthropicTranslator {
    tokens_in: Option<u64>,
    tokens_out: Option<u64>,
    usage_sent: bool,
}

impl AnthropicTranslator {
    fn record(&mut self, usage: AnthropicUsage) {
        self.tokens_in = usage.input_tokens.or(self.tokens_in);
        self.tokens_out = usage.output_tokens.or(self.tokens_out);
    }

    fn take_usage(&mut self) -> Option<StreamEvent> {
        if self.usage_sent {
            return None;
        }
        self.usage_sent = true;
        TokenUsage::from_counts(self.tokens_in, self.tokens_out).map(StreamEvent::Usage)
    }
}

impl FrameTranslator for AnthropicTranslator {
    type Record = AnthropicStreamEvent;

    fn translate(&mut self, record: AnthropicStreamEvent) -> Vec<StreamEvent> {
        match record {
            AnthropicStreamEvent::MessageStart { message } => {
                if let Some(usage) = message.usage {
                    self.record(usage);
                }
                Vec::new()
            }
            AnthropicStreamEvent::ContentBlockDelta {
                delta: AnthropicStreamDelta::TextDelta { text },
            } if !text.is_empty() => vec![StreamEvent::Delta(text)],
            AnthropicStreamEvent::MessageDelta { usage } => {
                if let Some(usage) = usage {
                    self.record(usage);
                }
                Vec::new()
            }
            AnthropicStreamEvent::MessageStop => self
                .take_usage()
                .into_iter()
                .chain(std::iter::once(StreamEvent::Done))
                .collect(),
            AnthropicStreamEvent::Error { error } => vec![StreamEvent::Error(error.message())],
            AnthropicStreamEvent::ContentBlockDelta { .. } | AnthropicStreamEvent::Other => Vec::new(),
        }
    }

    fn finish(&mut self) -> Vec<StreamEvent> {
        self.take_usage().into_iter().collect()
    }
}
