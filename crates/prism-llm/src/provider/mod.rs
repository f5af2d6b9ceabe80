//! Adapter trait and per-vendor implementations

pub mod anthropic;
pub mod compatible;
pub mod gemini;
pub mod openai;

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt, stream};
use prism_config::{ProviderConfig, ProviderKind};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::convert::FrameTranslator;
use crate::error::LlmError;
use crate::sse::{self, Frame};
use crate::types::{ChatRequest, EventStream, Message, StreamEvent};

/// One vendor's chat endpoint
///
/// `chat` fails before any network I/O when the credential is missing, and
/// fails with the response body when the vendor answers with a non-success
/// status. Once it returns, every outcome is reported inside the stream,
/// which ends after the first `Done` or `Error`.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Vendor served by this adapter
    fn kind(&self) -> ProviderKind;

    /// Issue a streaming chat call
    ///
    /// Firing `cancel` aborts the request, or ends the returned stream
    /// without a terminal event and closes the connection.
    async fn chat(&self, request: &ChatRequest, cancel: &CancellationToken) -> Result<EventStream, LlmError>;
}

/// Credential, base URL and HTTP client for one vendor
#[derive(Debug, Clone)]
pub struct Endpoint {
    kind: ProviderKind,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl Endpoint {
    /// Build from vendor configuration, defaulting to the public API URL
    pub fn new(kind: ProviderKind, client: Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(kind.default_base_url())
                .map_err(|e| anyhow::anyhow!("invalid default base URL for {kind}: {e}"))?,
        };

        Ok(Self {
            kind,
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Credential, or `MissingCredential` if unset or empty
    pub fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingCredential {
                provider: self.kind,
                variable: self.kind.credential_var(),
            })
    }

    /// Absolute URL for a path below the base URL
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }

    /// Start a JSON POST to `path`
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Send the request, racing it against cancellation
    ///
    /// Dropping the in-flight request future aborts the connection.
    pub async fn send_streaming(
        &self,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Response, LlmError> {
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(provider = %self.kind, "request cancelled before response");
                return Err(LlmError::Cancelled);
            }
            result = builder.send() => result.map_err(|e| {
                tracing::error!(provider = %self.kind, error = %e, "upstream request failed");
                LlmError::Transport {
                    provider: self.kind,
                    message: e.to_string(),
                }
            })?,
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!(provider = %self.kind, "request cancelled while reading error body");
                    return Err(LlmError::Cancelled);
                }
                body = response.text() => body.unwrap_or_else(|e| {
                    tracing::warn!(provider = %self.kind, error = %e, "failed to read error body");
                    format!("<unreadable error body: {e}>")
                }),
            };
            tracing::warn!(provider = %self.kind, status = %status, "upstream returned error");
            return Err(LlmError::Upstream {
                provider: self.kind,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Send the request and translate its body into an event stream
    pub async fn stream<X>(
        &self,
        builder: RequestBuilder,
        translator: X,
        cancel: &CancellationToken,
    ) -> Result<EventStream, LlmError>
    where
        X: FrameTranslator + 'static,
    {
        let response = self.send_streaming(builder, cancel).await?;
        Ok(translate_stream(
            self.kind,
            response.bytes_stream(),
            translator,
            cancel.clone(),
        ))
    }
}

struct DriverState<F, X> {
    kind: ProviderKind,
    frames: Pin<Box<F>>,
    translator: X,
    pending: VecDeque<StreamEvent>,
    cancel: CancellationToken,
    finished: bool,
}

/// Drive a byte stream through the frame decoder and a translator
///
/// Guarantees: at most one terminal event, nothing after it, a `Done` when
/// the connection closes without one, and no events at all once `cancel`
/// has fired. The stream stays fused: polling past the end keeps yielding
/// `None`.
pub fn translate_stream<S, B, E, X>(kind: ProviderKind, bytes: S, translator: X, cancel: CancellationToken) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: Display + 'static,
    X: FrameTranslator + 'static,
{
    let state = DriverState {
        kind,
        frames: Box::pin(sse::frames::<X::Record, _, _, _>(bytes)),
        translator,
        pending: VecDeque::new(),
        cancel,
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if state.cancel.is_cancelled() {
                tracing::debug!(provider = %state.kind, "stream cancelled");
                return None;
            }
            if let Some(event) = state.pending.pop_front() {
                return Some((event, state));
            }
            if state.finished {
                return None;
            }

            let frame = tokio::select! {
                biased;
                () = state.cancel.cancelled() => {
                    tracing::debug!(provider = %state.kind, "stream cancelled");
                    return None;
                }
                frame = state.frames.next() => frame,
            };

            let events = match frame {
                Some(Frame::Record(record)) => state.translator.translate(record),
                Some(Frame::Interrupted(message)) => vec![StreamEvent::Error(format!("stream interrupted: {message}"))],
                Some(Frame::Done) | None => {
                    let mut events = state.translator.finish();
                    events.push(StreamEvent::Done);
                    events
                }
            };

            for event in events {
                let terminal = event.is_terminal();
                if let StreamEvent::Error(message) = &event {
                    tracing::warn!(provider = %state.kind, error = %message, "stream ended with error");
                }
                state.pending.push_back(event);
                if terminal {
                    state.finished = true;
                    break;
                }
            }
        }
    })
    .fuse())
}

/// Message list with the system prompt prepended as a system message
pub(crate) fn with_system_message(request: &ChatRequest) -> Vec<Message> {
    request
        .system_prompt()
        .map(Message::system)
        .into_iter()
        .chain(request.messages.iter().cloned())
        .collect()
}
