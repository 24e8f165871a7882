//! Generation Stream Events
//!
//! Event types shared between the client crate (which decodes the wire
//! stream) and the front end (which renders live output). A decoder turns
//! raw protocol lines into these events; the client layers document
//! extraction on top and emits `Document` whenever a re-extraction over the
//! grown buffer succeeds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roadmap::Roadmap;

/// A single event observed while a generation stream is in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// Raw text chunk appended to the completion buffer.
    TextDelta { content: String },

    /// Best-effort document extracted from the buffer so far. Each one
    /// supersedes the previous wholesale; the last before `Complete` is
    /// the final document.
    Document { roadmap: Roadmap },

    /// Error reported inline by the stream or by decoding.
    Error { message: String },

    /// The stream has ended.
    Complete,
}

/// Errors that can occur while decoding a stream line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Frame that matched a known prefix but carried a malformed payload.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// The frame payload was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Trait for decoding a wire stream format into [`GenerationEvent`]s.
///
/// A single input line may produce zero, one, or multiple events.
pub trait StreamDecoder: Send + Sync {
    /// Returns the protocol name for logging and identification.
    fn protocol_name(&self) -> &'static str;

    /// Decode a raw stream line into events.
    fn decode_line(&mut self, line: &str) -> Result<Vec<GenerationEvent>, DecodeError>;

    /// Reset decoder state for a new stream.
    fn reset(&mut self) {
        // Default implementation does nothing
    }
}
