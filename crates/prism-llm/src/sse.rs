//! Line-oriented event-stream decoding shared by every vendor
//!
//! All six vendors stream `data: <json>` lines separated by blank lines.
//! Bytes are buffered until a newline arrives, so a frame split across
//! network chunks (even mid UTF-8 sequence) decodes intact.

use std::collections::VecDeque;
use std::fmt::Display;
use std::marker::PhantomData;
use std::pin::Pin;

use futures_util::{Stream, StreamExt, stream};
use serde::de::DeserializeOwned;

use crate::types::StreamEvent;

/// Prefix of every payload line
pub const DATA_MARKER: &str = "data:";

/// Payload signalling end of stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Accumulates raw bytes and yields complete lines
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk and drain every line terminated by `\n`
    ///
    /// The trailing unterminated fragment stays buffered. Returned lines have
    /// the newline and any `\r` stripped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..pos]);
            lines.push(text.trim_end_matches('\r').to_owned());
        }

        lines
    }

    /// Number of buffered bytes not yet terminated by a newline
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// What a single complete line means
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// JSON payload after the marker
    Payload(&'a str),
    /// The `[DONE]` sentinel
    Done,
    /// Keepalive, comment, `event:` field, blank line
    Ignored,
}

/// Classify one complete line
pub fn classify(line: &str) -> Line<'_> {
    let Some(rest) = line.trim().strip_prefix(DATA_MARKER) else {
        return Line::Ignored;
    };

    match rest.trim() {
        "" => Line::Ignored,
        DONE_SENTINEL => Line::Done,
        payload => Line::Payload(payload),
    }
}

/// One decoded unit of the wire stream
#[derive(Debug, PartialEq, Eq)]
pub enum Frame<T> {
    /// A payload that parsed as `T`
    Record(T),
    /// End of stream, sent by the vendor or synthesised on close
    Done,
    /// The byte stream failed mid-way
    Interrupted(String),
}

/// Incremental decoder from bytes to typed frames
///
/// Malformed payloads are skipped. Nothing is produced after `Done`.
pub struct FrameDecoder<T> {
    lines: LineBuffer,
    finished: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Default for FrameDecoder<T> {
    fn default() -> Self {
        Self {
            lines: LineBuffer::default(),
            finished: false,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> FrameDecoder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every frame it completes
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<Frame<T>> {
        if self.finished {
            return Vec::new();
        }

        let mut frames = Vec::new();
        for line in self.lines.push(chunk) {
            match classify(&line) {
                Line::Ignored => {
                    if !line.trim().is_empty() {
                        tracing::debug!(line = %line, "ignoring non-payload line");
                    }
                }
                Line::Done => {
                    self.finished = true;
                    frames.push(Frame::Done);
                    break;
                }
                Line::Payload(payload) => match serde_json::from_str::<T>(payload) {
                    Ok(record) => frames.push(Frame::Record(record)),
                    Err(e) => tracing::debug!(error = %e, "discarding malformed frame"),
                },
            }
        }

        frames
    }

    /// Signal that the connection closed
    ///
    /// Returns a synthesised `Done` unless the stream already finished.
    pub fn finish(&mut self) -> Option<Frame<T>> {
        if self.finished {
            return None;
        }
        self.finished = true;

        if self.lines.pending() > 0 {
            tracing::debug!(bytes = self.lines.pending(), "dropping unterminated trailing fragment");
        }

        Some(Frame::Done)
    }

    /// Stop decoding without producing a terminal frame
    fn abort(&mut self) {
        self.finished = true;
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

struct FrameState<T, S> {
    bytes: Pin<Box<S>>,
    decoder: FrameDecoder<T>,
    pending: VecDeque<Frame<T>>,
}

/// Turn a byte stream into a lazy stream of typed frames
///
/// Always ends with exactly one `Done` or `Interrupted` frame.
pub fn frames<T, S, B, E>(bytes: S) -> impl Stream<Item = Frame<T>> + Send
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Display,
{
    let state = FrameState {
        bytes: Box::pin(bytes),
        decoder: FrameDecoder::new(),
        pending: VecDeque::new(),
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                return Some((frame, state));
            }
            if state.decoder.is_finished() {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let decoded = state.decoder.decode(chunk.as_ref());
                    state.pending.extend(decoded);
                }
                Some(Err(e)) => {
                    state.decoder.abort();
                    return Some((Frame::Interrupted(e.to_string()), state));
                }
                None => return state.decoder.finish().map(|frame| (frame, state)),
            }
        }
    })
}

/// Encode an event as one `data:` frame for relaying downstream
///
/// # Errors
///
/// Returns an error if the event cannot be serialised
pub fn encode_sse(event: &StreamEvent) -> Result<String, serde_json::Error> {
    Ok(format!("{DATA_MARKER} {}\n\n", serde_json::to_string(event)?))
}
