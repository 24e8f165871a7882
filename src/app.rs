//! Command handlers.
//!
//! Each handler wires one subcommand to the [`RoadmapService`] trait and the
//! local session cache. Handlers stay thin: network and protocol work lives
//! in `skillforge-client`, document semantics in `skillforge-core`.

use std::io::Write;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::warn;

use skillforge_client::{
    Credentials, GenerationToken, GenerationTracker, RoadmapClient, RoadmapService,
    SaveRoadmapRequest, Session, SkillLevel,
};
use skillforge_core::{GenerationEvent, Roadmap};

use crate::config;
use crate::quiz;
use crate::render;

fn require_session() -> Result<Session> {
    config::load_session()?
        .context("not logged in; run `skillforge login <email> <password>` first")
}

async fn establish_session(client: &RoadmapClient, email: String, password: String, signup: bool) -> Result<()> {
    let credentials = Credentials { email, password };
    let token = if signup {
        client.signup(&credentials).await?
    } else {
        client.login(&credentials).await?
    };
    let session = Session::from(token);
    config::store_session(&session)?;
    println!("Logged in as {}", session.user.email);
    Ok(())
}

pub async fn signup(client: &RoadmapClient, email: String, password: String) -> Result<()> {
    establish_session(client, email, password, true).await
}

pub async fn login(client: &RoadmapClient, email: String, password: String) -> Result<()> {
    establish_session(client, email, password, false).await
}

pub fn logout() -> Result<()> {
    config::clear_session()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(client: &RoadmapClient) -> Result<()> {
    let session = require_session()?;
    let profile = client.current_user(&session).await?;
    let role = if profile.is_admin { " (admin)" } else { "" };
    println!("{}{}", profile.email, role);
    Ok(())
}

/// Drive one generation run: forward the service's event stream to `out`
/// while the request is in flight, discarding events once the run has been
/// superseded.
async fn run_generation<S, W>(
    service: &S,
    session: &Session,
    goal: &str,
    level: SkillLevel,
    token: &GenerationToken,
    quiet: bool,
    out: &mut W,
) -> Result<Roadmap>
where
    S: RoadmapService,
    W: Write + Send,
{
    let (tx, mut rx) = mpsc::channel::<GenerationEvent>(256);

    let (result, _) = tokio::join!(service.generate(session, goal, level, tx), async {
        while let Some(event) = rx.recv().await {
            if !token.is_current() {
                continue;
            }
            match event {
                GenerationEvent::TextDelta { content } if !quiet => {
                    let _ = write!(out, "{}", content);
                    let _ = out.flush();
                }
                GenerationEvent::Error { message } => {
                    warn!(message, "generation stream reported an error");
                }
                _ => {}
            }
        }
    });

    let roadmap = result.context("roadmap generation failed")?;
    if !token.is_current() {
        bail!("generation was superseded before it finished");
    }
    Ok(roadmap)
}

pub async fn generate(
    client: &RoadmapClient,
    goal: &str,
    level: SkillLevel,
    save: bool,
    quiet: bool,
) -> Result<()> {
    let session = require_session()?;
    let tracker = GenerationTracker::new();
    let token = tracker.begin();

    let mut stdout = std::io::stdout();
    let roadmap =
        run_generation(client, &session, goal, level, &token, quiet, &mut stdout).await?;
    if !quiet {
        println!();
        println!();
    }
    print!("{}", render::render_roadmap(&roadmap));

    if save {
        let request = SaveRoadmapRequest {
            title: roadmap.roadmap_title.clone(),
            user_goal: goal.to_string(),
            skill_level: level,
            roadmap_data: roadmap.clone(),
        };
        // A failed save must not discard the roadmap the user just watched
        // being generated.
        match client.save(&session, &request).await {
            Ok(saved) => println!("Saved as {}", saved.id),
            Err(e) => warn!(error = %e, "could not save the roadmap"),
        }
    }
    Ok(())
}

pub async fn list(client: &RoadmapClient) -> Result<()> {
    let session = require_session()?;
    let roadmaps = client.list(&session).await?;
    print!("{}", render::render_saved_list(&roadmaps));
    Ok(())
}

pub async fn show(client: &RoadmapClient, id: &str, interactive: bool) -> Result<()> {
    let session = require_session()?;
    let saved = client.get(&session, id).await?;
    let roadmap = saved.roadmap_data.sanitized();
    if interactive {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        quiz::run_session(roadmap, &mut input, &mut output)?;
    } else {
        print!("{}", render::render_roadmap(&roadmap));
    }
    Ok(())
}

pub async fn delete(client: &RoadmapClient, id: &str) -> Result<()> {
    let session = require_session()?;
    client.delete(&session, id).await?;
    println!("Deleted {}", id);
    Ok(())
}
