#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleships9k::{
    commentary::{self, CommentaryRequest},
    init_logging, ship_kind_named, CellStatus, Commander, ComputerPlayer, Coord, Deployment,
    Difficulty, Grid, LogKind, Mode, Orientation, Player, PowerUp, Session, Side, GRID_SIZE,
};
#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use tokio::task::JoinHandle;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

#[cfg(feature = "std")]
impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer.
    Solo {
        #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
        difficulty: DifficultyArg,
        #[arg(long, default_value = "Player 1")]
        name: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long = "commentary", help = "Ask the commentary service for a line after each turn")]
        with_commentary: bool,
    },
    /// Two commanders sharing one terminal.
    Duel {
        #[arg(long, default_value = "Player 1")]
        p1: String,
        #[arg(long, default_value = "Player 2")]
        p2: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch the computer play itself.
    Watch {
        #[arg(long, value_enum, default_value_t = DifficultyArg::Hard)]
        difficulty: DifficultyArg,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solo {
            difficulty,
            name,
            seed,
            with_commentary,
        } => {
            let mut rng = make_rng(seed);
            println!("Fleet deployment for {}", name);
            let (grid, fleet) = deploy_interactively(&mut rng)?;
            let mut session = Session::solo(difficulty.into(), name, grid, fleet, &mut rng)?;
            play(&mut session, &mut rng, with_commentary).await?;
        }
        Commands::Duel { p1, p2, seed } => {
            let mut rng = make_rng(seed);
            println!("Fleet deployment for {}", p1);
            let (g1, f1) = deploy_interactively(&mut rng)?;
            println!("\n{}\nHand the terminal to {}.", "\n".repeat(40), p2);
            let (g2, f2) = deploy_interactively(&mut rng)?;
            let mut session = Session::new(
                Mode::Duel,
                Commander::new(p1, g1, f1),
                Commander::new(p2, g2, f2),
            )?;
            play(&mut session, &mut rng, false).await?;
        }
        Commands::Watch { difficulty, seed } => {
            let mut rng = make_rng(seed);
            let difficulty: Difficulty = difficulty.into();
            let mut players = [
                ComputerPlayer::new(difficulty),
                ComputerPlayer::new(difficulty),
            ];
            let (g1, f1) = players[0].place_ships(&mut rng);
            let (g2, f2) = players[1].place_ships(&mut rng);
            let mut session = Session::new(
                Mode::Duel,
                Commander::new("ALPHA", g1, f1),
                Commander::new("BRAVO", g2, f2),
            )?;
            while !session.is_over() {
                let idx = if session.turn() == Side::Player { 0 } else { 1 };
                let view = session.defender().grid().fogged();
                let Some(at) = players[idx].select_target(&mut rng, &view) else {
                    break;
                };
                session.strike(at)?;
                print_recent(&session, 1);
            }
            print_summary(&session);
        }
    }
    Ok(())
}

/// Parse input like `C4` or `c-4` into a coordinate.
#[cfg(feature = "std")]
fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("Empty input")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize;
    if x >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.filter(|c| *c != '-').collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(x, row - 1))
}

/// Coordinate for a command. `shield` also takes a ship name, as in
/// `shield patrol boat`.
#[cfg(feature = "std")]
fn resolve_target(session: &Session, verb: &str, target: &str) -> Result<Coord, String> {
    if verb == "shield" {
        if let Some(kind) = ship_kind_named(target) {
            return session
                .attacker()
                .fleet()
                .ship(kind)
                .map(|ship| ship.anchor())
                .ok_or_else(|| format!("No {} in your fleet", kind));
        }
    }
    parse_coord(target)
}

#[cfg(feature = "std")]
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(feature = "std")]
fn deploy_interactively(rng: &mut SmallRng) -> anyhow::Result<(Grid, battleships9k::Fleet)> {
    let mut deployment = Deployment::new();
    while let Some(kind) = deployment.next_kind() {
        print_grid(deployment.grid(), true);
        let text = format!(
            "Place {} (length {}) as e.g. `A1 h` / `B2 v`, `auto` or `reset`: ",
            kind,
            kind.length()
        );
        let Some(line) = prompt(&text)? else {
            anyhow::bail!("input closed during deployment");
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("auto") => deployment.auto_arrange(rng),
            Some("reset") => deployment.reset(),
            Some(coord) => {
                let vertical = matches!(parts.next(), Some("v") | Some("V"));
                let orientation = Orientation::from_horizontal(!vertical);
                match parse_coord(coord) {
                    Ok(at) => {
                        if let Err(e) = deployment.place(at, orientation) {
                            println!("Cannot place there: {}", e);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            None => {}
        }
    }
    print_grid(deployment.grid(), true);
    Ok(deployment.finish()?)
}

#[cfg(feature = "std")]
async fn play(session: &mut Session, rng: &mut SmallRng, with_commentary: bool) -> anyhow::Result<()> {
    if with_commentary && commentary::api_key_from_env().is_none() {
        log::warn!("{} not set; commentary runs offline", commentary::API_KEY_ENV);
    }
    let mut viewer = session.turn();
    let mut pending: Option<JoinHandle<String>> = None;
    while !session.is_over() {
        if pending.as_ref().is_some_and(|h| h.is_finished()) {
            // already finished, so this does not wait
            if let Some(handle) = pending.take() {
                if let Ok(line) = handle.await {
                    println!("  >> {}", line);
                }
            }
        }
        let side = session.turn();
        if session.is_computer(side) {
            session.computer_turn(rng)?;
            print_recent(session, 1);
            continue;
        }
        if side != viewer && session.mode() == Mode::Duel {
            let _ = prompt(&format!(
                "{}Turn switch. Hand the terminal to {} and press enter.",
                "\n".repeat(40),
                session.attacker().name()
            ))?;
            viewer = side;
        }
        print_battle_view(session, side);
        let Some(line) = prompt("Command (e.g. `C4`, `shield C4`, `shield carrier`, `scan C4`, `strike C4`, `quit`): ")? else {
            break;
        };
        let (verb, target) = match line.split_once(char::is_whitespace) {
            Some((verb, target)) => (verb.to_ascii_lowercase(), target.trim()),
            None if line == "quit" => break,
            None if line.is_empty() => continue,
            None => ("fire".to_string(), line.as_str()),
        };
        let at = match resolve_target(session, &verb, target) {
            Ok(at) => at,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let outcome = match verb.as_str() {
            "fire" => session.strike(at).map(|_| ()),
            "shield" => session.deploy_shield(at).map(|_| ()),
            "strike" => session.area_strike(at).map(|_| ()),
            "scan" => session.sonar_scan(at).map(|report| {
                for cell in report.cells.iter().filter(|c| c.ship_present) {
                    println!("  contact at {}", cell.at);
                }
            }),
            other => {
                println!("Unknown command '{}'", other);
                Ok(())
            }
        };
        match outcome {
            Ok(()) => print_recent(session, 2),
            Err(e) => println!("Rejected: {}", e),
        }
        if with_commentary && pending.is_none() && !session.is_over() {
            let request = CommentaryRequest::from_session(session, Side::Player);
            // no commentary backend ships with the binary
            pending = Some(commentary::spawn_insight(None, request, commentary::DEFAULT_TIMEOUT));
        }
    }
    if let Some(handle) = pending {
        handle.abort();
    }
    print_summary(session);
    Ok(())
}

#[cfg(feature = "std")]
fn print_grid(grid: &Grid, reveal: bool) {
    print!("    ");
    for c in 0..GRID_SIZE {
        print!(" {}", (b'A' + c as u8) as char);
    }
    println!();
    for y in 0..GRID_SIZE {
        print!("  {:2}", y + 1);
        for x in 0..GRID_SIZE {
            let ch = match grid.status(Coord::new(x, y)) {
                Some(CellStatus::Hit) => 'X',
                Some(CellStatus::Miss) => 'o',
                Some(CellStatus::Occupied) if reveal => 'S',
                _ => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

#[cfg(feature = "std")]
fn print_battle_view(session: &Session, side: Side) {
    let me = session.commander(side);
    let enemy = session.commander(side.other());
    println!(
        "\n=== {} | CP {} | Accuracy {}% | Fleet {}/5 ===",
        me.name(),
        me.cp(),
        session.accuracy(side),
        me.ships_afloat()
    );
    println!("Defensive array:");
    print_grid(me.grid(), true);
    println!("Offensive HUD (targets {}/5):", enemy.ships_afloat());
    print_grid(enemy.grid(), false);
    let costs: Vec<String> = PowerUp::ALL
        .iter()
        .map(|p| format!("{} {} CP", p, p.cost()))
        .collect();
    println!("Power-ups: {}", costs.join(", "));
}

#[cfg(feature = "std")]
fn print_recent(session: &Session, n: usize) {
    let mut entries: Vec<_> = session.recent(n).collect();
    entries.reverse();
    for entry in entries {
        let tag = match entry.kind {
            LogKind::Player => "PLR",
            LogKind::Enemy => "ENY",
            LogKind::System => "SYS",
            LogKind::Success => "WIN",
        };
        println!("[{}] {}", tag, entry.message);
    }
}

#[cfg(feature = "std")]
fn print_summary(session: &Session) {
    match session.winner() {
        Some(side) => println!("\nVICTORY: {}", session.commander(side).name()),
        None => println!("\nMatch abandoned."),
    }
    for side in Side::BOTH {
        let c = session.commander(side);
        println!(
            "  {:<12} ships {}/5  accuracy {:>3}%  shots {}  CP {}",
            c.name(),
            c.ships_afloat(),
            session.accuracy(side),
            session.commander(side.other()).grid().shots_fired(),
            c.cp()
        );
    }
}
