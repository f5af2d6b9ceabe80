//! `OpenAI`-format frame translators

use super::FrameTranslator;
use crate::protocol::openai::{OpenAiStreamFrame, ResponsesStreamEvent};
use crate::types::{StreamEvent, TokenUsage};

/// Chat completions translator, shared by every OpenAI-compatible vendor
///
/// Some compatible vendors repeat the usage object on every chunk; only the
/// first non-empty one is emitted.
#[derive(Debug, Default)]
pub struct ChatChunkTranslator {
    usage_sent: bool,
}

impl FrameTranslator for ChatChunkTranslator {
    type Record = OpenAiStreamFrame;

    fn translate(&mut self, record: OpenAiStreamFrame) -> Vec<StreamEvent> {
        let chunk = match record {
            OpenAiStreamFrame::Error { error } => return vec![StreamEvent::Error(error.message())],
            OpenAiStreamFrame::Chunk(chunk) => chunk,
        };

        let mut events = Vec::new();

        if !self.usage_sent
            && let Some(usage) = chunk
                .usage
                .and_then(|usage| TokenUsage::from_counts(usage.prompt_tokens, usage.completion_tokens))
        {
            self.usage_sent = true;
            events.push(StreamEvent::Usage(usage));
        }

        if let Some(content) = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
        {
            events.push(StreamEvent::Delta(content));
        }

        events
    }
}

/// Responses API translator
#[derive(Debug, Default)]
pub struct ResponsesTranslator;

impl FrameTranslator for ResponsesTranslator {
    type Record = ResponsesStreamEvent;

    fn translate(&mut self, record: ResponsesStreamEvent) -> Vec<StreamEvent> {
        match record {
            ResponsesStreamEvent::OutputTextDelta { delta } if !delta.is_empty() => {
                vec![StreamEvent::Delta(delta)]
            }
            ResponsesStreamEvent::Completed { response } => {
                let usage = response
                    .and_then(|response| response.usage)
                    .and_then(|usage| TokenUsage::from_counts(usage.input_tokens, usage.output_tokens));

                usage
                    .map(StreamEvent::Usage)
                    .into_iter()
                    .chain(std::iter::once(StreamEvent::Done))
                    .collect()
            }
            ResponsesStreamEvent::Failed { response } => {
                let message = response
                    .and_then(|response| response.error)
                    .map_or_else(|| "response failed".to_owned(), |error| error.message());
                vec![StreamEvent::Error(message)]
            }
            ResponsesStreamEvent::Error { error, message } => {
                let message = error
                    .map(|error| error.message())
                    .or(message)
                    .unwrap_or_else(|| "unknown error".to_owned());
                vec![StreamEvent::Error(message)]
            }
            ResponsesStreamEvent::OutputTextDelta { .. } | ResponsesStreamEvent::Other => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(json: &str) -> OpenAiStreamFrame {
        serde_json::from_str(json).unwrap()
    }

    fn responses(json: &str) -> ResponsesStreamEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn chat_delta_maps_to_delta() {
        let mut translator = ChatChunkTranslator::default();
        let events = translator.translate(chat(r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#));
        assert_eq!(events, vec![StreamEvent::Delta("Hel".to_owned())]);
    }

    #[test]
    fn chat_role_only_and_empty_deltas_are_dropped() {
        let mut translator = ChatChunkTranslator::default();
        assert!(
            translator
                .translate(chat(r#"{"choices":[{"delta":{"role":"assistant","content":""}}]}"#))
                .is_empty()
        );
        assert!(translator.translate(chat(r#"{"choices":[{"delta":{}}]}"#)).is_empty());
    }

    #[test]
    fn chat_usage_is_emitted_once() {
        let mut translator = ChatChunkTranslator::default();
        let usage = r#"{"choices":[],"usage":{"prompt_tokens":5,"completion_tokens":2}}"#;

        assert_eq!(
            translator.translate(chat(usage)),
            vec![StreamEvent::Usage(TokenUsage {
                tokens_in: 5,
                tokens_out: 2
            })]
        );
        assert!(translator.translate(chat(usage)).is_empty());
    }

    #[test]
    fn chat_zero_usage_is_not_usage() {
        let mut translator = ChatChunkTranslator::default();
        let events = translator.translate(chat(
            r#"{"choices":[{"delta":{"content":"a"}}],"usage":{"prompt_tokens":0,"completion_tokens":0}}"#,
        ));
        assert_eq!(events, vec![StreamEvent::Delta("a".to_owned())]);

        let events = translator.translate(chat(r#"{"choices":[],"usage":{"prompt_tokens":9,"completion_tokens":3}}"#));
        assert_eq!(
            events,
            vec![StreamEvent::Usage(TokenUsage {
                tokens_in: 9,
                tokens_out: 3
            })]
        );
    }

    #[test]
    fn chat_error_frame_maps_to_error() {
        let mut translator = ChatChunkTranslator::default();
        let events = translator.translate(chat(r#"{"error":{"message":"context length exceeded"}}"#));
        assert_eq!(events, vec![StreamEvent::Error("context length exceeded".to_owned())]);
    }

    #[test]
    fn responses_delta_and_completion() {
        let mut translator = ResponsesTranslator;
        assert_eq!(
            translator.translate(responses(r#"{"type":"response.output_text.delta","delta":"Hi"}"#)),
            vec![StreamEvent::Delta("Hi".to_owned())]
        );
        assert_eq!(
            translator.translate(responses(
                r#"{"type":"response.completed","response":{"usage":{"input_tokens":7,"output_tokens":1}}}"#
            )),
            vec![
                StreamEvent::Usage(TokenUsage {
                    tokens_in: 7,
                    tokens_out: 1
                }),
                StreamEvent::Done
            ]
        );
    }

    #[test]
    fn responses_completion_without_usage_is_just_done() {
        let mut translator = ResponsesTranslator;
        assert_eq!(
            translator.translate(responses(r#"{"type":"response.completed","response":{}}"#)),
            vec![StreamEvent::Done]
        );
    }

    #[test]
    fn responses_errors() {
        let mut translator = ResponsesTranslator;
        assert_eq!(
            translator.translate(responses(r#"{"type":"error","message":"server overloaded"}"#)),
            vec![StreamEvent::Error("server overloaded".to_owned())]
        );
        assert_eq!(
            translator.translate(responses(r#"{"type":"response.error","error":{"message":"bad input"}}"#)),
            vec![StreamEvent::Error("bad input".to_owned())]
        );
        assert_eq!(
            translator.translate(responses(r#"{"type":"response.failed","response":{"error":{"message":"timeout"}}}"#)),
            vec![StreamEvent::Error("timeout".to_owned())]
        );
    }

    #[test]
    fn responses_lifecycle_events_are_ignored() {
        let mut translator = ResponsesTranslator;
        assert!(translator.translate(responses(r#"{"type":"response.created","response":{}}"#)).is_empty());
    }
}
