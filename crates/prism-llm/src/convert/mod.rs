//! Translation from vendor stream frames to [`StreamEvent`]s

pub mod anthropic;
pub mod gemini;
pub mod openai;

use serde::de::DeserializeOwned;

use crate::types::StreamEvent;

/// Stateful per-call mapping from decoded vendor frames to internal events
///
/// A translator only sees frames that decoded successfully. The driver in
/// [`crate::provider`] stops at the first terminal event a translator
/// returns, so implementations may emit `Done` or `Error` directly.
pub trait FrameTranslator: Send {
    /// Vendor frame type decoded from each `data:` payload
    type Record: DeserializeOwned + Send + 'static;

    /// Map one frame to zero or more events
    fn translate(&mut self, record: Self::Record) -> Vec<StreamEvent>;

    /// Events to emit before `Done` when the stream ends without a terminal
    /// event of its own
    fn finish(&mut self) -> Vec<StreamEvent> {
        Vec::new()
    }
}
