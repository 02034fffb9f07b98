//! Match state for two sides and the turn rules that tie the engine
//! operations together.

use alloc::{format, string::String, vec::Vec};
use log::{info, warn};
use rand::Rng;

use crate::{
    ai::{select_computer_shot, Difficulty},
    common::{Coord, EngineError, ShotResult},
    config::COMPUTER_NAME,
    fleet::{generate_fleet, Fleet},
    grid::Grid,
    powerup::{apply_shield, area_scan, area_strike, ScanReport},
    resolver::resolve_shot,
    ship::ShipKind,
};

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

/// Solo play is against the computer, which always commands
/// [`Side::Opponent`]. Duels pass one device between two people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Solo(Difficulty),
    Duel,
}

/// A side's board, fleet and command point balance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Commander {
    name: String,
    grid: Grid,
    fleet: Fleet,
    cp: u32,
}

impl Commander {
    pub fn new(name: impl Into<String>, grid: Grid, fleet: Fleet) -> Self {
        Self {
            name: name.into(),
            grid,
            fleet,
            cp: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn cp(&self) -> u32 {
        self.cp
    }

    pub fn ships_afloat(&self) -> usize {
        self.fleet.ships_afloat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum LogKind {
    Player,
    Enemy,
    System,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub seq: u64,
    pub kind: LogKind,
    pub message: String,
}

/// What a turn action did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Strike { at: Coord, result: ShotResult },
    AreaStrike { center: Coord, shots: Vec<(Coord, ShotResult)> },
    Shield { kind: ShipKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Side that acted.
    pub side: Side,
    pub action: Action,
    pub cp_awarded: u32,
    /// The acting side moves again.
    pub continue_turn: bool,
    pub winner: Option<Side>,
    /// Side to act next; unchanged once the match is decided.
    pub next_turn: Side,
}

/// A match in progress. The driver owns it and calls one action per input;
/// every action is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    mode: Mode,
    commanders: [Commander; 2],
    turn: Side,
    winner: Option<Side>,
    log: Vec<LogEntry>,
}

impl Session {
    /// Start a match with two deployed fleets. The player side moves first.
    /// Each fleet must be complete and laid out exactly as its grid shows.
    pub fn new(mode: Mode, player: Commander, opponent: Commander) -> Result<Self, EngineError> {
        for commander in [&player, &opponent] {
            if !commander.fleet.is_complete() {
                return Err(EngineError::IncompleteFleet {
                    placed: commander.fleet.len(),
                });
            }
            commander.fleet.check_layout(&commander.grid)?;
        }
        let mut session = Self {
            mode,
            commanders: [player, opponent],
            turn: Side::Player,
            winner: None,
            log: Vec::new(),
        };
        let label = match mode {
            Mode::Solo(_) => "SOLO",
            Mode::Duel => "DUAL",
        };
        session.push_log(LogKind::System, format!("INITIALIZING {} OPS PROTOCOL...", label));
        session.push_log(
            LogKind::System,
            String::from("ALL VESSELS DEPLOYED. READY FOR ENGAGEMENT."),
        );
        info!(
            "match started: {} vs {} ({:?})",
            session.commanders[0].name, session.commanders[1].name, mode
        );
        Ok(session)
    }

    /// Solo match against a randomly deployed computer fleet.
    pub fn solo<R: Rng + ?Sized>(
        difficulty: Difficulty,
        name: impl Into<String>,
        grid: Grid,
        fleet: Fleet,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let (enemy_grid, enemy_fleet) = generate_fleet(rng);
        Self::new(
            Mode::Solo(difficulty),
            Commander::new(name, grid, fleet),
            Commander::new(COMPUTER_NAME, enemy_grid, enemy_fleet),
        )
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Side whose action is next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn commander(&self, side: Side) -> &Commander {
        &self.commanders[side.index()]
    }

    fn commander_mut(&mut self, side: Side) -> &mut Commander {
        &mut self.commanders[side.index()]
    }

    pub fn attacker(&self) -> &Commander {
        self.commander(self.turn)
    }

    pub fn defender(&self) -> &Commander {
        self.commander(self.turn.other())
    }

    /// Whether the computer plays `side`.
    pub fn is_computer(&self, side: Side) -> bool {
        matches!(self.mode, Mode::Solo(_)) && side == Side::Opponent
    }

    /// Percentage of `side`'s shots that hit, read from the enemy board.
    /// Strikes absorbed by a shield are left out.
    pub fn accuracy(&self, side: Side) -> u32 {
        self.commander(side.other()).grid.accuracy()
    }

    /// Full combat log, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Up to `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().rev().take(n)
    }

    /// Message of the latest log entry.
    pub fn last_event(&self) -> Option<&str> {
        self.log.last().map(|e| e.message.as_str())
    }

    /// Fire a single strike at the defender.
    pub fn strike(&mut self, at: Coord) -> Result<TurnReport, EngineError> {
        self.ensure_live()?;
        let side = self.turn;
        let defender = self.commander(side.other());
        let outcome = resolve_shot(&defender.grid, &defender.fleet, at)
            .inspect_err(|e| warn!("strike at {} rejected: {}", at, e))?;

        let defender = self.commander_mut(side.other());
        defender.grid = outcome.grid;
        defender.fleet = outcome.fleet;
        self.commander_mut(side).cp += outcome.cp_awarded;

        let (kind, message) = self.strike_message(side, at, outcome.result);
        self.push_log(kind, message);
        Ok(self.finish_turn(
            side,
            Action::Strike {
                at,
                result: outcome.result,
            },
            outcome.cp_awarded,
            outcome.continue_turn,
            outcome.fleet_destroyed,
        ))
    }

    /// Let the computer take its shot. Only valid on the computer's turn in a
    /// solo match.
    pub fn computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, EngineError> {
        self.ensure_live()?;
        let difficulty = match self.mode {
            Mode::Solo(difficulty) if self.is_computer(self.turn) => difficulty,
            _ => return Err(EngineError::NotComputerTurn),
        };
        self.autopilot_turn(difficulty, rng)
    }

    /// Pick a strike for whichever side is attacking with the computer's
    /// targeting, then fire it. Used for simulations and hints.
    pub fn autopilot_turn<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<TurnReport, EngineError> {
        self.ensure_live()?;
        let view = self.defender().grid.fogged();
        let at = select_computer_shot(&view, difficulty, rng).ok_or(EngineError::GameOver)?;
        self.strike(at)
    }

    /// Shield the attacker's own ship at `at`. Uses up the turn.
    pub fn deploy_shield(&mut self, at: Coord) -> Result<TurnReport, EngineError> {
        self.ensure_live()?;
        let side = self.turn;
        let commander = self.commander(side);
        let outcome = apply_shield(&commander.grid, &commander.fleet, at, commander.cp)
            .inspect_err(|e| warn!("shield rejected: {}", e))?;

        let commander = self.commander_mut(side);
        commander.fleet = outcome.fleet;
        commander.cp = outcome.balance;
        let message = format!(
            "{} deploys AEGIS SHIELD on {}.",
            commander.name,
            upper(outcome.kind.name())
        );
        self.push_log(LogKind::System, message);
        Ok(self.finish_turn(
            side,
            Action::Shield { kind: outcome.kind },
            0,
            false,
            false,
        ))
    }

    /// Sonar sweep of the defender's board. The attacker keeps the turn.
    pub fn sonar_scan(&mut self, center: Coord) -> Result<ScanReport, EngineError> {
        self.ensure_live()?;
        let side = self.turn;
        let report = area_scan(&self.defender().grid, center, self.attacker().cp)
            .inspect_err(|e| warn!("scan rejected: {}", e))?;

        let commander = self.commander_mut(side);
        commander.cp = report.balance;
        let message = format!(
            "{} runs SONAR SCAN at {}... {} contact(s).",
            commander.name,
            center,
            report.contacts()
        );
        self.push_log(LogKind::System, message);
        Ok(report)
    }

    /// Area strike on the defender. The turn continues if any cell was a hit.
    pub fn area_strike(&mut self, center: Coord) -> Result<TurnReport, EngineError> {
        self.ensure_live()?;
        let side = self.turn;
        let defender = self.commander(side.other());
        let outcome = area_strike(&defender.grid, &defender.fleet, center, self.attacker().cp)
            .inspect_err(|e| warn!("area strike rejected: {}", e))?;

        let defender = self.commander_mut(side.other());
        defender.grid = outcome.grid;
        defender.fleet = outcome.fleet;
        self.commander_mut(side).cp = outcome.balance;

        let hits = outcome.shots.iter().filter(|(_, r)| r.is_hit()).count();
        let message = format!(
            "{} launches TRIDENT MISSILE at {}... {} hit(s) across {} cell(s).",
            self.commander(side).name,
            center,
            hits,
            outcome.shots.len()
        );
        self.push_log(self.side_kind(side), message);
        for (_, result) in &outcome.shots {
            if let ShotResult::Sunk(kind) = result {
                let message = format!("CONFIRMED! {} neutralised.", upper(kind.name()));
                self.push_log(LogKind::Success, message);
            }
        }
        Ok(self.finish_turn(
            side,
            Action::AreaStrike {
                center,
                shots: outcome.shots,
            },
            outcome.cp_awarded,
            outcome.continue_turn,
            outcome.fleet_destroyed,
        ))
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.winner.is_some() {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    /// Fleet destruction decides the match before turn passing is looked at.
    fn finish_turn(
        &mut self,
        side: Side,
        action: Action,
        cp_awarded: u32,
        continue_turn: bool,
        fleet_destroyed: bool,
    ) -> TurnReport {
        if fleet_destroyed {
            self.winner = Some(side);
            let message = format!(
                "{} FLEET NEUTRALIZED. {} WINS.",
                upper(&self.commander(side.other()).name),
                upper(&self.commander(side).name)
            );
            self.push_log(LogKind::Success, message);
            info!("match over: {} wins", self.commander(side).name);
        } else if !continue_turn {
            self.turn = side.other();
        }
        TurnReport {
            side,
            action,
            cp_awarded,
            continue_turn: continue_turn && !fleet_destroyed,
            winner: self.winner,
            next_turn: self.turn,
        }
    }

    fn side_kind(&self, side: Side) -> LogKind {
        match side {
            Side::Player => LogKind::Player,
            Side::Opponent => LogKind::Enemy,
        }
    }

    fn strike_message(&self, side: Side, at: Coord, result: ShotResult) -> (LogKind, String) {
        let computer = self.is_computer(side);
        let lead = if computer {
            format!("Enemy fires at {}... ", at)
        } else {
            format!("{} strikes {}... ", self.commander(side).name, at)
        };
        let (kind, tail) = match result {
            ShotResult::Miss if computer => (self.side_kind(side), String::from("MISS")),
            ShotResult::Miss => (self.side_kind(side), String::from("MISS. Strike failed.")),
            ShotResult::Hit(_) => (self.side_kind(side), String::from("DIRECT HIT!")),
            ShotResult::Sunk(kind) if computer => {
                (self.side_kind(side), format!("SUNK YOUR {}!", upper(kind.name())))
            }
            ShotResult::Sunk(kind) => (
                LogKind::Success,
                format!("CONFIRMED! {} neutralised.", upper(kind.name())),
            ),
            ShotResult::Absorbed(kind) => (
                self.side_kind(side),
                format!("DEFLECTED. {} shield absorbed the strike.", upper(kind.name())),
            ),
        };
        (kind, lead + &tail)
    }

    fn push_log(&mut self, kind: LogKind, message: String) {
        let seq = self.log.len() as u64;
        self.log.push(LogEntry { seq, kind, message });
    }
}

fn upper(s: &str) -> String {
    s.to_ascii_uppercase()
}
