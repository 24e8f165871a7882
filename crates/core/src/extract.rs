//! Streaming Document Extraction
//!
//! Recovers a best-effort [`Roadmap`] from a growing, possibly incomplete
//! text buffer — the accumulated body of an in-flight generation stream.
//! The buffer may carry arbitrary non-JSON noise around the document (debug
//! markers, partial tokens), and the document itself is usually truncated
//! mid-token while streaming.
//!
//! Extraction is a total function: malformed input yields "no document yet"
//! (`None`), never an error. The caller simply re-invokes on the next chunk.
//!
//! The scan tracks brace depth while skipping string literals (including
//! escape sequences), so a `}` inside a string value never closes the
//! document early. Noise before the opening brace and after the matching
//! close brace is ignored.

use crate::roadmap::Roadmap;

/// Find the end index (inclusive) of the balanced JSON object opening at
/// `start`, which must point at a `{`. Returns `None` if the object is
/// still unterminated at the end of `text`.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Attempt to extract a roadmap document from the text accumulated so far.
///
/// Candidate spans are tried from each `{` in order: a balanced span that
/// fails to parse as a roadmap (stray braces in log noise, an inner object)
/// is skipped rather than treated as fatal, so a valid document later in
/// the buffer is still found.
pub fn extract_roadmap(text: &str) -> Option<Roadmap> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find('{') {
        let start = search_from + rel;
        if let Some(end) = balanced_end(text, start) {
            if let Ok(roadmap) = serde_json::from_str::<Roadmap>(&text[start..=end]) {
                return Some(roadmap.sanitized());
            }
        }
        search_from = start + 1;
    }
    None
}

/// Accumulates stream text and re-runs extraction on every append.
///
/// Intentionally re-scans the whole buffer each time instead of keeping
/// incremental parser state: buffers are bounded (a single roadmap
/// document, not an unbounded log), and a from-scratch re-parse tolerates
/// every transient invalid state the stream passes through.
#[derive(Debug, Clone, Default)]
pub struct RoadmapExtractor {
    buffer: String,
}

impl RoadmapExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the best available document, if any.
    pub fn push(&mut self, chunk: &str) -> Option<Roadmap> {
        self.buffer.push_str(chunk);
        extract_roadmap(&self.buffer)
    }

    /// Re-run extraction over the current buffer without appending.
    pub fn current(&self) -> Option<Roadmap> {
        extract_roadmap(&self.buffer)
    }

    /// The raw accumulated text, for live display of the in-flight stream.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Clear all accumulated text for a new stream.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
