//! Backend API Request/Response Types
//!
//! DTOs matching the backend's wire contracts. Field names mirror the
//! backend exactly; the roadmap document itself lives in `skillforge-core`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skillforge_core::Roadmap;

/// Self-declared expertise level submitted with a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(format!(
                "unknown skill level '{}' (expected beginner, intermediate, or advanced)",
                other
            )),
        }
    }
}

/// Email/password pair for signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// User profile as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Present on `/auth/me`, absent in the login/signup envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Token envelope from `/auth/login` and `/auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: UserProfile,
}

/// Body of `POST /api/roadmap/generate`. The goal is sent under `prompt`
/// (the streaming-completion contract the backend expects) and duplicated
/// in `user_goal` for the legacy field.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub user_goal: String,
    pub skill_level: SkillLevel,
}

impl GenerateRequest {
    pub fn new(goal: impl Into<String>, skill_level: SkillLevel) -> Self {
        let goal = goal.into();
        Self {
            prompt: goal.clone(),
            user_goal: goal,
            skill_level,
        }
    }
}

/// Body of `POST /api/roadmap/save`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveRoadmapRequest {
    pub title: String,
    pub user_goal: String,
    pub skill_level: SkillLevel,
    pub roadmap_data: Roadmap,
}

/// A saved roadmap as returned by save/list/get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoadmap {
    pub id: String,
    pub title: String,
    pub user_goal: String,
    pub skill_level: String,
    pub roadmap_data: Roadmap,
    /// Backend-formatted timestamp, passed through for display only.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_round_trip() {
        for (s, level) in [
            ("beginner", SkillLevel::Beginner),
            ("intermediate", SkillLevel::Intermediate),
            ("advanced", SkillLevel::Advanced),
        ] {
            assert_eq!(s.parse::<SkillLevel>().unwrap(), level);
            assert_eq!(level.to_string(), s);
            assert_eq!(serde_json::to_string(&level).unwrap(), format!("\"{}\"", s));
        }
        assert!("expert".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_generate_request_duplicates_goal() {
        let req = GenerateRequest::new("Learn Rust", SkillLevel::Advanced);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"prompt\":\"Learn Rust\""));
        assert!(json.contains("\"user_goal\":\"Learn Rust\""));
        assert!(json.contains("\"skill_level\":\"advanced\""));
    }

    #[test]
    fn test_token_response_deserializes() {
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "user": {"id": "u1", "email": "a@b.c", "is_admin": false}
        }"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "tok");
        assert_eq!(resp.user.email, "a@b.c");
        assert!(resp.user.created_at.is_none());
    }
}
