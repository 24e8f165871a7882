//! Data-Stream Protocol Decoder
//!
//! The backend streams generation output as newline-delimited frames in the
//! Vercel AI data-stream format: `0:<json string>` for text chunks and
//! `3:<json string>` for inline errors. Frame payloads are JSON-encoded
//! strings, so chunk boundaries inside the roadmap JSON survive transport
//! intact.

use skillforge_core::streaming::{DecodeError, GenerationEvent, StreamDecoder};

/// Decoder for the data-stream wire format.
#[derive(Debug, Clone, Default)]
pub struct DataStreamDecoder;

impl DataStreamDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl StreamDecoder for DataStreamDecoder {
    fn protocol_name(&self) -> &'static str {
        "data-stream"
    }

    fn decode_line(&mut self, line: &str) -> Result<Vec<GenerationEvent>, DecodeError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(vec![]);
        }

        // Frames are "<prefix>:<payload>"; anything else is skipped.
        let Some((prefix, payload)) = trimmed.split_once(':') else {
            return Ok(vec![]);
        };

        match prefix {
            "0" => {
                let content: String = serde_json::from_str(payload)
                    .map_err(|e| DecodeError::ParseError(e.to_string()))?;
                Ok(vec![GenerationEvent::TextDelta { content }])
            }
            "3" => {
                let message: String = serde_json::from_str(payload)
                    .map_err(|e| DecodeError::ParseError(e.to_string()))?;
                Ok(vec![GenerationEvent::Error { message }])
            }
            // Other frame types (message annotations, finish metadata) are
            // not produced by this backend; skip rather than fail.
            _ => Ok(vec![]),
        }
    }
}
