#![cfg(feature = "std")]

//! Boundary to an optional text commentary service.
//!
//! The engine never waits on commentary and never sees its failures: every
//! call resolves to a display string, falling back to fixed lines when the
//! service is missing, slow or broken.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::config::NUM_SHIPS;
use crate::session::{Session, Side};

/// Environment variable carrying the service credential.
pub const API_KEY_ENV: &str = "API_KEY";

pub const OFFLINE_FALLBACK: &str = "COMMUNICATIONS LINK OFFLINE: ENCRYPTION KEY REQUIRED";
pub const ERROR_FALLBACK: &str = "TACTICAL ANALYSIS INTERRUPTED. RE-ESTABLISHING LINK...";
pub const EMPTY_FALLBACK: &str = "CALCULATING NEXT MANEUVER...";

/// Default time allowed for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fleet health and the latest event, as seen from one side.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommentaryRequest {
    pub player_ships_afloat: usize,
    pub enemy_ships_afloat: usize,
    pub last_event: String,
}

impl CommentaryRequest {
    pub fn new(player_ships_afloat: usize, enemy_ships_afloat: usize, last_event: impl Into<String>) -> Self {
        Self {
            player_ships_afloat,
            enemy_ships_afloat,
            last_event: last_event.into(),
        }
    }

    /// Snapshot `session` from `viewer`'s point of view.
    pub fn from_session(session: &Session, viewer: Side) -> Self {
        Self::new(
            session.commander(viewer).ships_afloat(),
            session.commander(viewer.other()).ships_afloat(),
            session.last_event().unwrap_or_default(),
        )
    }

    /// Text sent to the service.
    pub fn prompt(&self) -> String {
        format!(
            "You are an advanced naval tactical AI in a game of Battleship.\n\
             Player remaining ships: {}/{}.\n\
             AI remaining ships: {}/{}.\n\
             Last event: {}.\n\
             Provide a brief, futuristic, one-sentence tactical commentary or taunt for the command log.",
            self.player_ships_afloat, NUM_SHIPS, self.enemy_ships_afloat, NUM_SHIPS, self.last_event
        )
    }
}

/// A source of commentary lines.
#[async_trait::async_trait]
pub trait Commentator: Send + Sync {
    async fn commentate(&self, request: &CommentaryRequest) -> anyhow::Result<String>;
}

/// Credential from [`API_KEY_ENV`], ignoring blank values.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Ask for a commentary line. Never fails: missing commentator, errors,
/// timeouts and empty replies map to the fallback lines.
pub async fn tactical_insight(
    commentator: Option<&dyn Commentator>,
    request: &CommentaryRequest,
    timeout: Duration,
) -> String {
    let Some(commentator) = commentator else {
        warn!("commentary link offline: no credential configured");
        return OFFLINE_FALLBACK.to_string();
    };
    match tokio::time::timeout(timeout, commentator.commentate(request)).await {
        Ok(Ok(text)) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
        Ok(Ok(text)) => {
            debug!("commentary received ({} bytes)", text.len());
            text.trim().to_string()
        }
        Ok(Err(e)) => {
            warn!("commentary failed: {:#}", e);
            ERROR_FALLBACK.to_string()
        }
        Err(_) => {
            warn!("commentary timed out after {:?}", timeout);
            ERROR_FALLBACK.to_string()
        }
    }
}

/// Fire-and-forget variant: the driver may poll or drop the handle, gameplay
/// does not wait on it. Must be called inside a tokio runtime.
pub fn spawn_insight(
    commentator: Option<Arc<dyn Commentator>>,
    request: CommentaryRequest,
    timeout: Duration,
) -> tokio::task::JoinHandle<String> {
    tokio::spawn(async move { tactical_insight(commentator.as_deref(), &request, timeout).await })
}
