#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleships9k::{init_logging, Commander, ComputerPlayer, Difficulty, Mode, Player, Session, Side};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use serde_json::json;

/// Computer vs computer match, printed as a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Args {
    /// RNG seed for player one.
    seed1: u64,
    /// RNG seed for player two.
    seed2: u64,
    #[arg(long, default_value_t = Difficulty::Hard, help = "Targeting strength: easy, medium or hard")]
    difficulty: Difficulty,
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let Args {
        seed1,
        seed2,
        difficulty,
    } = Args::parse();

    let mut rngs = [SmallRng::seed_from_u64(seed1), SmallRng::seed_from_u64(seed2)];
    let mut players = [ComputerPlayer::new(difficulty), ComputerPlayer::new(difficulty)];

    let (g1, f1) = players[0].place_ships(&mut rngs[0]);
    let (g2, f2) = players[1].place_ships(&mut rngs[1]);
    let mut session = Session::new(
        Mode::Duel,
        Commander::new("player1", g1, f1),
        Commander::new("player2", g2, f2),
    )?;

    let mut turns = 0usize;
    while !session.is_over() {
        let idx = match session.turn() {
            Side::Player => 0,
            Side::Opponent => 1,
        };
        let view = session.defender().grid().fogged();
        let at = players[idx]
            .select_target(&mut rngs[idx], &view)
            .ok_or_else(|| anyhow::anyhow!("no target left for {}", session.attacker().name()))?;
        let report = session.strike(at)?;
        if !report.continue_turn {
            turns += 1;
        }
    }

    let summary = |side: Side| {
        json!({
            "shots": session.commander(side.other()).grid().shots_fired(),
            "accuracy": session.accuracy(side),
            "ships_afloat": session.commander(side).ships_afloat(),
            "cp": session.commander(side).cp(),
        })
    };
    let result = json!({
        "difficulty": difficulty.as_str(),
        "player1": summary(Side::Player),
        "player2": summary(Side::Opponent),
        "winner": session.winner().map(|side| session.commander(side).name().to_string()),
        "turns": turns,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
