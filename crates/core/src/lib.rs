//! Skillforge Core
//!
//! Foundational types for the Skillforge workspace: the roadmap wire model,
//! the streaming document extractor, and the interaction state machine that
//! drives the stage/quiz presentation. This crate has zero dependencies on
//! transport-level code (HTTP client, terminal front end, etc.).
//!
//! ## Module Organization
//!
//! - `roadmap` - Roadmap document model (`Roadmap`, `Stage`, `QuizItem`, `Resource`)
//! - `extract` - Best-effort document recovery from a growing text buffer
//! - `controller` - Stage/quiz interaction reducer (`RoadmapController`)
//! - `streaming` - Generation event types and the stream decoder trait
//!
//! ## Design Principles
//!
//! 1. **Dependency-light** - only serde, serde_json, and thiserror
//! 2. **Total functions** - extraction and interaction never panic on bad input;
//!    "no document yet" is the only failure signal while a stream is in flight
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the
//!    workspace

pub mod controller;
pub mod extract;
pub mod roadmap;
pub mod streaming;

// ── Roadmap Model ──────────────────────────────────────────────────────
pub use roadmap::{QuizItem, Resource, Roadmap, Stage};

// ── Extraction ─────────────────────────────────────────────────────────
pub use extract::{extract_roadmap, RoadmapExtractor};

// ── Interaction State ──────────────────────────────────────────────────
pub use controller::{Action, InteractionState, QuizPhase, RoadmapController};

// ── Streaming Types ────────────────────────────────────────────────────
pub use streaming::{DecodeError, GenerationEvent, StreamDecoder};
