//! Request-scoped value types shared by every adapter

mod message;
mod stream;
mod usage;

pub use message::{ChatRequest, Message, ModelConfig, Role};
pub use stream::{EventStream, StreamEvent, TextStream};
pub use usage::{TokenCost, TokenUsage};
