//! Backend HTTP Client
//!
//! Concrete [`RoadmapService`] over reqwest. The generation call consumes
//! the chunked response body incrementally: bytes are assembled into
//! protocol lines, decoded into events, and every text delta re-runs the
//! document extractor over the accumulated completion buffer. Extracted
//! documents supersede each other wholesale; the last one standing when
//! the stream ends is the result.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;

use skillforge_core::extract::RoadmapExtractor;
use skillforge_core::streaming::{GenerationEvent, StreamDecoder};
use skillforge_core::Roadmap;

use crate::decoder::DataStreamDecoder;
use crate::error::{parse_http_error, ApiError, ApiResult};
use crate::http::{build_http_client, ClientConfig};
use crate::service::RoadmapService;
use crate::session::Session;
use crate::types::{
    Credentials, GenerateRequest, SaveRoadmapRequest, SavedRoadmap, SkillLevel, TokenResponse,
    UserProfile,
};

/// HTTP client for the Skillforge backend API.
#[derive(Debug, Clone)]
pub struct RoadmapClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RoadmapClient {
    pub fn new(config: ClientConfig) -> Self {
        let http = build_http_client(&config);
        Self {
            http,
            base_url: config.base_url,
        }
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidRequest {
                message: format!("invalid endpoint {}: {}", path, e),
            })
    }

    async fn ensure_success(
        response: reqwest::Response,
        context: &str,
    ) -> ApiResult<reqwest::Response> {
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(parse_http_error(status, &body, context))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| ApiError::ParseError {
            message: e.to_string(),
        })
    }
}

/// Line-by-line event assembly for one generation stream: decode, forward,
/// and re-extract.
struct GenerationAssembler {
    decoder: DataStreamDecoder,
    extractor: RoadmapExtractor,
    latest: Option<Roadmap>,
    stream_error: Option<String>,
}

impl GenerationAssembler {
    fn new() -> Self {
        Self {
            decoder: DataStreamDecoder::new(),
            extractor: RoadmapExtractor::new(),
            latest: None,
            stream_error: None,
        }
    }

    async fn handle_line(&mut self, line: &str, tx: &mpsc::Sender<GenerationEvent>) {
        let events = match self.decoder.decode_line(line) {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "failed to decode stream line");
                let _ = tx
                    .send(GenerationEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                return;
            }
        };

        for event in events {
            match event {
                GenerationEvent::TextDelta { content } => {
                    let _ = tx
                        .send(GenerationEvent::TextDelta {
                            content: content.clone(),
                        })
                        .await;
                    if let Some(doc) = self.extractor.push(&content) {
                        if self.latest.as_ref() != Some(&doc) {
                            self.latest = Some(doc.clone());
                            let _ = tx.send(GenerationEvent::Document { roadmap: doc }).await;
                        }
                    }
                }
                GenerationEvent::Error { message } => {
                    self.stream_error = Some(message.clone());
                    let _ = tx.send(GenerationEvent::Error { message }).await;
                }
                other => {
                    let _ = tx.send(other).await;
                }
            }
        }
    }
}

/// Consume a generation byte stream to completion.
///
/// Generic over the byte source so tests can drive it with canned chunks;
/// the client passes `response.bytes_stream()`.
pub(crate) async fn consume_generation_stream<S, E>(
    mut stream: S,
    tx: &mpsc::Sender<GenerationEvent>,
) -> ApiResult<Roadmap>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut assembler = GenerationAssembler::new();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ApiError::NetworkError {
            message: e.to_string(),
        })?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        // Process complete lines; a partial line stays buffered until its
        // newline arrives.
        while let Some(line_end) = buffer.find('\n') {
            let line: String = buffer.drain(..=line_end).collect();
            assembler
                .handle_line(line.trim_end_matches(['\r', '\n']), tx)
                .await;
        }
    }

    // Trailing line without a final newline.
    if !buffer.trim().is_empty() {
        let line = std::mem::take(&mut buffer);
        assembler.handle_line(&line, tx).await;
    }

    let _ = tx.send(GenerationEvent::Complete).await;

    match assembler.latest {
        Some(doc) => Ok(doc),
        None => Err(ApiError::GenerationFailed {
            message: assembler
                .stream_error
                .unwrap_or_else(|| "stream ended without a valid roadmap document".to_string()),
        }),
    }
}

#[async_trait]
impl RoadmapService for RoadmapClient {
    async fn signup(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/signup")?)
            .json(credentials)
            .send()
            .await?;
        let response = Self::ensure_success(response, "signup").await?;
        Self::parse_json(response).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/login")?)
            .json(credentials)
            .send()
            .await?;
        let response = Self::ensure_success(response, "login").await?;
        Self::parse_json(response).await
    }

    async fn current_user(&self, session: &Session) -> ApiResult<UserProfile> {
        let response = self
            .http
            .get(self.endpoint("/api/auth/me")?)
            .header("Authorization", session.bearer())
            .send()
            .await?;
        let response = Self::ensure_success(response, "me").await?;
        Self::parse_json(response).await
    }

    async fn generate(
        &self,
        session: &Session,
        goal: &str,
        skill_level: SkillLevel,
        tx: mpsc::Sender<GenerationEvent>,
    ) -> ApiResult<Roadmap> {
        let body = GenerateRequest::new(goal, skill_level);
        let response = self
            .http
            .post(self.endpoint("/api/roadmap/generate")?)
            .header("Authorization", session.bearer())
            .json(&body)
            .send()
            .await?;

        // A refused generation never reaches extraction.
        let response = Self::ensure_success(response, "generate").await?;
        debug!(goal, %skill_level, "generation stream opened");
        consume_generation_stream(response.bytes_stream(), &tx).await
    }

    async fn save(
        &self,
        session: &Session,
        request: &SaveRoadmapRequest,
    ) -> ApiResult<SavedRoadmap> {
        let response = self
            .http
            .post(self.endpoint("/api/roadmap/save")?)
            .header("Authorization", session.bearer())
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_success(response, "save").await?;
        Self::parse_json(response).await
    }

    async fn list(&self, session: &Session) -> ApiResult<Vec<SavedRoadmap>> {
        let response = self
            .http
            .get(self.endpoint("/api/roadmap/list")?)
            .header("Authorization", session.bearer())
            .send()
            .await?;
        let response = Self::ensure_success(response, "list").await?;
        Self::parse_json(response).await
    }

    async fn get(&self, session: &Session, id: &str) -> ApiResult<SavedRoadmap> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/roadmap/{}", id))?)
            .header("Authorization", session.bearer())
            .send()
            .await?;
        let response = Self::ensure_success(response, "get").await?;
        Self::parse_json(response).await
    }

    async fn delete(&self, session: &Session, id: &str) -> ApiResult<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/roadmap/{}", id))?)
            .header("Authorization", session.bearer())
            .send()
            .await?;

        // Idempotent from the caller's perspective: the id being gone
        // already is the desired end state.
        if response.status().as_u16() == 404 {
            debug!(id, "delete target already absent");
            return Ok(());
        }
        Self::ensure_success(response, "delete").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    const DOC: &str = r#"{"roadmap_title":"Go Deep Dive","summary":"S","stages":[{"stage_id":"1","title":"Basics","description":"D","learning_objectives":["o1"],"project_idea":"P"}]}"#;

    fn frames_for(text: &str, frame_len: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(frame_len)
            .map(|c| {
                let piece: String = c.iter().collect();
                format!("0:{}\n", serde_json::to_string(&piece).unwrap())
            })
            .collect()
    }

    fn byte_stream(
        chunks: Vec<Vec<u8>>,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Unpin {
        tokio_stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
    }

    async fn drain(rx: &mut mpsc::Receiver<GenerationEvent>) -> Vec<GenerationEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_streamed_document_extraction() {
        let wire: String = frames_for(DOC, 10).concat();
        let chunks = vec![wire.into_bytes()];
        let (tx, mut rx) = mpsc::channel(256);

        let doc = consume_generation_stream(byte_stream(chunks), &tx)
            .await
            .unwrap();
        assert_eq!(doc.roadmap_title, "Go Deep Dive");

        let events = drain(&mut rx).await;
        assert!(matches!(events.last(), Some(GenerationEvent::Complete)));
        let extracted: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::Document { roadmap } => Some(roadmap.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(extracted.last().unwrap(), &doc);
    }

    #[tokio::test]
    async fn test_chunk_boundaries_inside_frames() {
        // Transport chunks may split a protocol line anywhere.
        let wire: String = frames_for(DOC, 25).concat();
        let bytes = wire.into_bytes();
        let chunks: Vec<Vec<u8>> = bytes.chunks(7).map(|c| c.to_vec()).collect();
        let (tx, _rx) = mpsc::channel(1024);

        let doc = consume_generation_stream(byte_stream(chunks), &tx)
            .await
            .unwrap();
        assert_eq!(doc.stage_count(), 1);
    }

    #[tokio::test]
    async fn test_debug_noise_before_document() {
        let mut wire = String::from("0:\"[DEBUG] Connecting to backend...\"\n");
        wire.push_str("0:\"[DEBUG] Connection Successful. Processing response...\"\n");
        wire.push_str(&frames_for(DOC, 40).concat());
        let (tx, _rx) = mpsc::channel(256);

        let doc = consume_generation_stream(byte_stream(vec![wire.into_bytes()]), &tx)
            .await
            .unwrap();
        assert_eq!(doc.roadmap_title, "Go Deep Dive");
    }

    #[tokio::test]
    async fn test_stream_without_document_fails() {
        let wire = String::from("0:\"[DEBUG] Exception: upstream boom\"\n");
        let (tx, mut rx) = mpsc::channel(256);

        let err = consume_generation_stream(byte_stream(vec![wire.into_bytes()]), &tx)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::GenerationFailed { .. }));

        let events = drain(&mut rx).await;
        assert!(matches!(events.last(), Some(GenerationEvent::Complete)));
    }

    #[tokio::test]
    async fn test_error_frame_message_is_surfaced() {
        let wire = String::from("3:\"credits exhausted\"\n");
        let (tx, _rx) = mpsc::channel(256);

        let err = consume_generation_stream(byte_stream(vec![wire.into_bytes()]), &tx)
            .await
            .unwrap_err();
        match err {
            ApiError::GenerationFailed { message } => {
                assert!(message.contains("credits exhausted"));
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline() {
        let wire: String = frames_for(DOC, DOC.len()).concat();
        let wire = wire.trim_end_matches('\n').to_string();
        let (tx, _rx) = mpsc::channel(256);

        let doc = consume_generation_stream(byte_stream(vec![wire.into_bytes()]), &tx)
            .await
            .unwrap();
        assert_eq!(doc.roadmap_title, "Go Deep Dive");
    }

    #[test]
    fn test_endpoint_join() {
        let client = RoadmapClient::new(ClientConfig::default());
        let url = client.endpoint("/api/roadmap/list").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/roadmap/list");
    }
}
