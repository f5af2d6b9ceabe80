//! Mock vendor backend for integration tests
//!
//! Accepts any POST, records it, and answers with a scripted body served one
//! chunk at a time so frames can straddle chunk boundaries.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use futures_util::{StreamExt, stream};
use tokio_util::sync::CancellationToken;

const RESET_GRACE: Duration = Duration::from_millis(50);

/// Scripted response for every request
#[derive(Debug, Clone)]
pub struct Script {
    status: StatusCode,
    chunks: Vec<Bytes>,
    chunk_delay: Duration,
    header_delay: Option<Duration>,
    hold_open: bool,
    reset_after_chunks: bool,
}

impl Script {
    /// Successful event stream made of raw body chunks
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::byte_chunks(chunks.into_iter().map(|chunk| chunk.into().into_bytes()))
    }

    /// Successful event stream made of raw byte chunks, which may split characters
    pub fn byte_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            status: StatusCode::OK,
            chunks: chunks.into_iter().map(Bytes::from).collect(),
            chunk_delay: Duration::ZERO,
            header_delay: None,
            hold_open: false,
            reset_after_chunks: false,
        }
    }

    /// One `data:` line per payload, each its own chunk
    pub fn frames<I, S>(payloads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::chunks(payloads.into_iter().map(|payload| format!("data: {}\n\n", payload.as_ref())))
    }

    /// Non-success status with a plain body
    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            ..Self::chunks([body])
        }
    }

    /// Pause between chunks
    #[must_use]
    pub const fn chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Pause before sending response headers
    #[must_use]
    pub const fn header_delay(mut self, delay: Duration) -> Self {
        self.header_delay = Some(delay);
        self
    }

    /// Keep the connection open after the last chunk
    ///
    /// With a non-success status the error body never completes.
    #[must_use]
    pub const fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Abort the connection after the last chunk
    ///
    /// With a non-success status the error body cannot be read in full.
    #[must_use]
    pub const fn reset_after_chunks(mut self) -> Self {
        self.reset_after_chunks = true;
        self
    }
}

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

struct MockState {
    script: Script,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock vendor bound to a random local port
pub struct MockVendor {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockVendor {
    /// Start the mock server, returning immediately
    pub async fn start(script: Script) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            script,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to configure a vendor with
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_owned(),
        query: uri.query().map(ToOwned::to_owned),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let script = state.script.clone();

    if let Some(delay) = script.header_delay {
        tokio::time::sleep(delay).await;
    }

    if !script.status.is_success() && !script.hold_open && !script.reset_after_chunks {
        return (script.status, script.chunks.concat()).into_response();
    }

    let delay = script.chunk_delay;
    let chunks = stream::iter(script.chunks).then(move |chunk| async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok::<_, std::io::Error>(chunk)
    });

    let body = if script.hold_open {
        Body::from_stream(chunks.chain(stream::pending()))
    } else if script.reset_after_chunks {
        // Let the headers and the last chunk reach the client before aborting
        Body::from_stream(chunks.chain(stream::once(async {
            tokio::time::sleep(RESET_GRACE).await;
            Err(std::io::Error::other("connection reset by mock"))
        })))
    } else {
        Body::from_stream(chunks)
    };

    if !script.status.is_success() {
        return (script.status, body).into_response();
    }

    ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
}
