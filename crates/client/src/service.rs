//! Roadmap Service Trait
//!
//! Defines the interface the front end programs against. The concrete
//! implementation is [`crate::RoadmapClient`]; tests substitute fakes.

use async_trait::async_trait;
use tokio::sync::mpsc;

use skillforge_core::streaming::GenerationEvent;
use skillforge_core::Roadmap;

use crate::error::ApiResult;
use crate::session::Session;
use crate::types::{
    Credentials, SaveRoadmapRequest, SavedRoadmap, SkillLevel, TokenResponse, UserProfile,
};

/// Backend operations the Skillforge front end depends on.
#[async_trait]
pub trait RoadmapService: Send + Sync {
    /// Create a new account and return its session token.
    async fn signup(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;

    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;

    /// Fetch the profile behind a token; also serves as a validity probe.
    async fn current_user(&self, session: &Session) -> ApiResult<UserProfile>;

    /// Generate a roadmap, streaming [`GenerationEvent`]s over `tx` while
    /// the request is in flight. Resolves to the final document, or to
    /// `GenerationFailed` when the stream ends without one.
    async fn generate(
        &self,
        session: &Session,
        goal: &str,
        skill_level: SkillLevel,
        tx: mpsc::Sender<GenerationEvent>,
    ) -> ApiResult<Roadmap>;

    /// Persist a generated roadmap to the user's account.
    async fn save(&self, session: &Session, request: &SaveRoadmapRequest)
        -> ApiResult<SavedRoadmap>;

    /// List the user's saved roadmaps, most recent first.
    async fn list(&self, session: &Session) -> ApiResult<Vec<SavedRoadmap>>;

    /// Fetch one saved roadmap by id.
    async fn get(&self, session: &Session, id: &str) -> ApiResult<SavedRoadmap>;

    /// Delete a saved roadmap. Deleting an id that is already gone is not
    /// an error.
    async fn delete(&self, session: &Session, id: &str) -> ApiResult<()>;
}
