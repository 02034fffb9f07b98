use std::sync::Arc;
use std::time::Duration;

use battleships9k::commentary::{
    spawn_insight, tactical_insight, Commentator, CommentaryRequest, DEFAULT_TIMEOUT,
    EMPTY_FALLBACK, ERROR_FALLBACK, OFFLINE_FALLBACK,
};
use battleships9k::{Commander, Coord, Deployment, Mode, Orientation, Session, Side};

struct Fixed(&'static str);

#[async_trait::async_trait]
impl Commentator for Fixed {
    async fn commentate(&self, _request: &CommentaryRequest) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct Broken;

#[async_trait::async_trait]
impl Commentator for Broken {
    async fn commentate(&self, _request: &CommentaryRequest) -> anyhow::Result<String> {
        anyhow::bail!("upstream returned 503")
    }
}

struct Stalled;

#[async_trait::async_trait]
impl Commentator for Stalled {
    async fn commentate(&self, _request: &CommentaryRequest) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

/// Echoes the fleet counts it was asked about.
struct Echo;

#[async_trait::async_trait]
impl Commentator for Echo {
    async fn commentate(&self, request: &CommentaryRequest) -> anyhow::Result<String> {
        Ok(format!("{} vs {}", request.player_ships_afloat, request.enemy_ships_afloat))
    }
}

fn request() -> CommentaryRequest {
    CommentaryRequest::new(4, 2, "Enemy fires at B-7... DIRECT HIT!")
}

#[tokio::test]
async fn test_offline_without_commentator() {
    assert_eq!(tactical_insight(None, &request(), DEFAULT_TIMEOUT).await, OFFLINE_FALLBACK);
}

#[tokio::test]
async fn test_reply_is_trimmed() {
    let line = tactical_insight(Some(&Fixed("  Your fleet is doomed.\n")), &request(), DEFAULT_TIMEOUT).await;
    assert_eq!(line, "Your fleet is doomed.");
}

#[tokio::test]
async fn test_fallbacks() {
    assert_eq!(tactical_insight(Some(&Fixed("   ")), &request(), DEFAULT_TIMEOUT).await, EMPTY_FALLBACK);
    assert_eq!(tactical_insight(Some(&Broken), &request(), DEFAULT_TIMEOUT).await, ERROR_FALLBACK);
    assert_eq!(
        tactical_insight(Some(&Stalled), &request(), Duration::from_millis(20)).await,
        ERROR_FALLBACK
    );
}

#[tokio::test]
async fn test_spawned_insight() {
    let commentator: Arc<dyn Commentator> = Arc::new(Echo);
    let handle = spawn_insight(Some(commentator), request(), DEFAULT_TIMEOUT);
    assert_eq!(handle.await.unwrap(), "4 vs 2");

    let offline = spawn_insight(None, request(), DEFAULT_TIMEOUT);
    assert_eq!(offline.await.unwrap(), OFFLINE_FALLBACK);
}

#[test]
fn test_request_from_session() {
    let fleet = || {
        let mut deployment = Deployment::new();
        for row in 0..5 {
            deployment.place(Coord::new(0, row * 2), Orientation::Horizontal).unwrap();
        }
        deployment.finish().unwrap()
    };
    let (g1, f1) = fleet();
    let (g2, f2) = fleet();
    let mut session =
        Session::new(Mode::Duel, Commander::new("Ada", g1, f1), Commander::new("Grace", g2, f2)).unwrap();
    session.strike(Coord::new(0, 8)).unwrap();
    session.strike(Coord::new(1, 8)).unwrap();

    let ada = CommentaryRequest::from_session(&session, Side::Player);
    assert_eq!(ada.player_ships_afloat, 5);
    assert_eq!(ada.enemy_ships_afloat, 4);
    assert_eq!(ada.last_event, "Ada strikes B-9... CONFIRMED! PATROL BOAT neutralised.");
    let grace = CommentaryRequest::from_session(&session, Side::Opponent);
    assert_eq!(grace.player_ships_afloat, 4);

    let prompt = ada.prompt();
    assert!(prompt.contains("Player remaining ships: 5/5."));
    assert!(prompt.contains("AI remaining ships: 4/5."));
    assert!(prompt.contains("Last event: Ada strikes B-9"));

    let json = serde_json::to_value(&ada).unwrap();
    assert_eq!(json["enemy_ships_afloat"], 4);
}

#[test]
fn test_log_level_parsing() {
    use log::LevelFilter;
    assert_eq!(battleships9k::level_from(None), LevelFilter::Info);
    assert_eq!(battleships9k::level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(battleships9k::level_from(Some(" OFF ")), LevelFilter::Off);
    assert_eq!(battleships9k::level_from(Some("chatty")), LevelFilter::Info);
    battleships9k::init_logging();
    battleships9k::init_logging();
}
