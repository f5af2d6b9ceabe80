mod harness;

use futures_util::StreamExt;
use harness::config::client_for;
use harness::mock_vendor::{MockVendor, Script};
use prism_config::ProviderKind;
use prism_llm::client::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use prism_llm::{CompletionRequest, LlmError, Message, TokenUsage, cost};
use serde_json::json;
use tokio_util::sync::CancellationToken;

const HELLO_FRAMES: &[&str] = &[
    r#"{"choices":[{"delta":{"role":"assistant","content":""}}],"usage":null}"#,
    r#"{"choices":[{"delta":{"content":"Hel"}}],"usage":null}"#,
    r#"{"choices":[{"delta":{"content":"lo!"}}],"usage":null}"#,
    r#"{"choices":[],"usage":{"prompt_tokens":5,"completion_tokens":2,"total_tokens":7}}"#,
    "[DONE]",
];

const ERROR_AFTER_FIRST_DELTA: &[&str] = &[
    r#"{"choices":[{"delta":{"content":"Hel"}}]}"#,
    r#"{"error":{"message":"upstream overloaded","type":"server_error"}}"#,
    r#"{"choices":[{"delta":{"content":"lo!"}}]}"#,
    "[DONE]",
];

fn hi(model: &str) -> CompletionRequest {
    CompletionRequest::new(model, vec![Message::user("hi")])
}

#[tokio::test]
async fn buffered_call_returns_content_usage_and_cost() {
    let mock = MockVendor::start(Script::frames(HELLO_FRAMES)).await.unwrap();
    let client = client_for(ProviderKind::OpenAi, &mock.base_url());

    let response = client
        .complete(&hi("gpt-4o-mini"), &CancellationToken::new())
        .await
        .unwrap();

    let usage = TokenUsage {
        tokens_in: 5,
        tokens_out: 2,
    };
    assert_eq!(response.content, "Hello!");
    assert_eq!(response.provider, ProviderKind::OpenAi);
    assert_eq!(response.usage, Some(usage));
    assert_eq!(response.cost, Some(cost("gpt-4o-mini", &usage)));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["usage"], json!({"tokensIn": 5, "tokensOut": 2}));
    assert!(json["cost"]["usd"].is_number());
    assert!(json["cost"]["localCurrency"].is_number());
}

#[tokio::test]
async fn buffered_call_sends_defaults() {
    let mock = MockVendor::start(Script::frames(HELLO_FRAMES)).await.unwrap();
    let client = client_for(ProviderKind::OpenAi, &mock.base_url());

    client
        .complete(&hi("gpt-4o-mini").system_prompt("be brief"), &CancellationToken::new())
        .await
        .unwrap();

    let body = &mock.requests()[0].body;
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["temperature"], DEFAULT_TEMPERATURE);
    assert_eq!(body["max_completion_tokens"], DEFAULT_MAX_TOKENS);
    assert_eq!(body["stream"], true);
    assert_eq!(body["stream_options"], json!({"include_usage": true}));
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": "hi"}
        ])
    );
}

#[tokio::test]
async fn no_usage_observed_means_no_cost() {
    let mock = MockVendor::start(Script::frames([
        r#"{"choices":[{"delta":{"content":"Hi"}}]}"#,
        r#"{"choices":[],"usage":{"prompt_tokens":0,"completion_tokens":0}}"#,
        "[DONE]",
    ]))
    .await
    .unwrap();
    let client = client_for(ProviderKind::Solar, &mock.base_url());

    let response = client
        .complete(&hi("solar-pro2"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.content, "Hi");
    assert_eq!(response.usage, None);
    assert_eq!(response.cost, None);

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("cost").is_none());
}

#[tokio::test]
async fn error_after_first_delta_fails_buffered_call() {
    let mock = MockVendor::start(Script::frames(ERROR_AFTER_FIRST_DELTA)).await.unwrap();
    let client = client_for(ProviderKind::OpenAi, &mock.base_url());

    let err = client
        .complete(&hi("gpt-4o-mini"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Stream(ref message) if message == "upstream overloaded"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn error_after_first_delta_ends_streaming_call() {
    let mock = MockVendor::start(Script::frames(ERROR_AFTER_FIRST_DELTA)).await.unwrap();
    let client = client_for(ProviderKind::OpenAi, &mock.base_url());

    let items: Vec<_> = client
        .complete_stream(&hi("gpt-4o-mini"), &CancellationToken::new())
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().unwrap(), "Hel");
    assert!(matches!(&items[1], Err(LlmError::Stream(message)) if message == "upstream overloaded"));
}

#[tokio::test]
async fn streaming_call_yields_text_only() {
    let mock = MockVendor::start(Script::frames([
        r#"{"type":"message_start","message":{"usage":{"input_tokens":12,"output_tokens":1}}}"#,
        r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Bon"}}"#,
        r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"jour"}}"#,
        r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":2}}"#,
        r#"{"type":"message_stop"}"#,
    ]))
    .await
    .unwrap();
    let client = client_for(ProviderKind::Anthropic, &mock.base_url());

    let fragments: Vec<String> = client
        .complete_stream(&hi("claude-opus-4-5-20251101"), &CancellationToken::new())
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(fragments, vec!["Bon", "jour"]);
}

#[tokio::test]
async fn anthropic_usage_is_combined_into_one_record() {
    let mock = MockVendor::start(Script::frames([
        r#"{"type":"message_start","message":{"usage":{"input_tokens":12,"output_tokens":1}}}"#,
        r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Bonjour"}}"#,
        r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":2}}"#,
        r#"{"type":"message_stop"}"#,
    ]))
    .await
    .unwrap();
    let client = client_for(ProviderKind::Anthropic, &mock.base_url());

    let response = client
        .complete(&hi("claude-sonnet-4-5-20250929"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        response.usage,
        Some(TokenUsage {
            tokens_in: 12,
            tokens_out: 2
        })
    );
    assert_eq!(mock.requests()[0].body["system"], serde_json::Value::Null);
}

#[tokio::test]
async fn gemini_reports_final_usage_once() {
    let mock = MockVendor::start(Script::frames([
        r#"{"candidates":[{"content":{"parts":[{"text":"Ciao"}]}}],"usageMetadata":{"promptTokenCount":4,"candidatesTokenCount":1}}"#,
        r#"{"candidates":[{"content":{"parts":[{"text":"!"}]}}],"usageMetadata":{"promptTokenCount":4,"candidatesTokenCount":2}}"#,
    ]))
    .await
    .unwrap();
    let client = client_for(ProviderKind::Gemini, &mock.base_url());

    let response = client
        .complete(&hi("gemini-2.5-flash"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.content, "Ciao!");
    assert_eq!(
        response.usage,
        Some(TokenUsage {
            tokens_in: 4,
            tokens_out: 2
        })
    );
}

#[tokio::test]
async fn server_error_is_upstream_failure() {
    let mock = MockVendor::start(Script::status(
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        "backend exploded",
    ))
    .await
    .unwrap();
    let client = client_for(ProviderKind::Xai, &mock.base_url());

    let Err(err) = client.complete_stream(&hi("grok-4"), &CancellationToken::new()).await else {
        panic!("expected upstream error");
    };

    assert!(matches!(
        err,
        LlmError::Upstream { status: 500, ref body, .. } if body == "backend exploded"
    ));
}
