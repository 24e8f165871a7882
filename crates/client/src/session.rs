//! Authenticated Session Context
//!
//! The bearer token and user identity are carried in an explicit `Session`
//! value passed to every authenticated call; nothing in the client reads
//! ambient/global state. Where the session is cached between runs is the
//! front end's concern.

use serde::{Deserialize, Serialize};

use crate::types::{TokenResponse, UserProfile};

/// An authenticated session against the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}

impl Session {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

impl From<TokenResponse> for Session {
    fn from(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            user: resp.user,
        }
    }
}
