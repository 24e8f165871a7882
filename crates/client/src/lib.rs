//! Skillforge Client
//!
//! Typed HTTP client for the Skillforge roadmap backend:
//! - Authentication (signup, login, current user)
//! - Roadmap generation over a chunked data stream, with live document
//!   extraction
//! - Saved-roadmap persistence (save, list, get, delete)
//!
//! Also includes the concrete data-stream decoder, the stale-stream guard
//! used to discard superseded generations, and the HTTP client factory.

pub mod client;
pub mod decoder;
pub mod error;
pub mod generation;
pub mod http;
pub mod service;
pub mod session;
pub mod types;

// Re-export main types
pub use client::RoadmapClient;
pub use decoder::DataStreamDecoder;
pub use error::{parse_http_error, ApiError, ApiResult};
pub use generation::{GenerationToken, GenerationTracker};
pub use http::{build_http_client, ClientConfig};
pub use service::RoadmapService;
pub use session::Session;
pub use types::*;
