//! Session Cache
//!
//! Persists the authenticated session between CLI invocations as a JSON
//! file under the user config directory. The library crates never read
//! this; the session is always loaded here and passed down explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use skillforge_client::Session;

const APP_DIR: &str = "skillforge";
const SESSION_FILE: &str = "session.json";

fn session_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("could not determine the user config directory")?;
    Ok(base.join(APP_DIR).join(SESSION_FILE))
}

pub fn load_session() -> Result<Option<Session>> {
    load_session_from(&session_path()?)
}

pub fn store_session(session: &Session) -> Result<()> {
    store_session_at(&session_path()?, session)
}

pub fn clear_session() -> Result<()> {
    clear_session_at(&session_path()?)
}

fn load_session_from(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            // A corrupt cache means logged out, not a crash.
            warn!(error = %e, "ignoring unreadable session file");
            Ok(None)
        }
    }
}

fn store_session_at(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let raw = serde_json::to_string_pretty(session)?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
}

fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillforge_client::UserProfile;

    fn sample_session() -> Session {
        Session {
            access_token: "tok".into(),
            user: UserProfile {
                id: "u1".into(),
                email: "a@b.c".into(),
                is_admin: false,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        assert!(load_session_from(&path).unwrap().is_none());
        store_session_at(&path, &sample_session()).unwrap();
        let loaded = load_session_from(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token, "tok");
        assert_eq!(loaded.user.email, "a@b.c");

        clear_session_at(&path).unwrap();
        assert!(load_session_from(&path).unwrap().is_none());
        // Clearing twice is fine.
        clear_session_at(&path).unwrap();
    }

    #[test]
    fn test_corrupt_session_treated_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_session_from(&path).unwrap().is_none());
    }
}
