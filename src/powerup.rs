//! Command-point power-ups: shield, sonar scan and area strike.
//!
//! Every action checks the balance before anything else and leaves the
//! inputs untouched on rejection.

use alloc::vec::Vec;
use core::fmt;
use log::debug;

use crate::common::{check_bounds, Coord, EngineError, ShotResult};
use crate::config::{SCAN_COST, SCAN_DISPLAY_MS, SHIELD_COST, STRIKE_COST};
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::resolver::resolve_shot;
use crate::ship::ShipKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerUp {
    Shield,
    Scan,
    Strike,
}

impl PowerUp {
    pub const ALL: [PowerUp; 3] = [PowerUp::Shield, PowerUp::Scan, PowerUp::Strike];

    pub const fn cost(self) -> u32 {
        match self {
            PowerUp::Shield => SHIELD_COST,
            PowerUp::Scan => SCAN_COST,
            PowerUp::Strike => STRIKE_COST,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PowerUp::Shield => "Aegis Shield",
            PowerUp::Scan => "Sonar Scan",
            PowerUp::Strike => "Trident Missile",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PowerUp::Shield => {
                "Deploys a one-time shield on a friendly vessel, absorbing the next incoming strike."
            }
            PowerUp::Scan => {
                "Reveals a 3x3 grid area for a short time. Does not consume your attack phase."
            }
            PowerUp::Strike => {
                "Strikes every open cell of a 3x3 area. Replaces your standard attack."
            }
        }
    }

    /// Balance left after paying for this power-up.
    pub fn charge(self, balance: u32) -> Result<u32, EngineError> {
        balance
            .checked_sub(self.cost())
            .ok_or(EngineError::InsufficientCp {
                cost: self.cost(),
                balance,
            })
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldOutcome {
    pub kind: ShipKind,
    pub fleet: Fleet,
    pub balance: u32,
}

/// Shield the friendly ship covering `at`. The ship must be afloat and not
/// already shielded; hit cells of a damaged ship are valid targets.
pub fn apply_shield(
    grid: &Grid,
    fleet: &Fleet,
    at: Coord,
    balance: u32,
) -> Result<ShieldOutcome, EngineError> {
    let balance = PowerUp::Shield.charge(balance)?;
    check_bounds(at)?;
    let kind = grid
        .cell(at)
        .and_then(|cell| cell.occupant)
        .ok_or(EngineError::NoShipAtTarget)?;

    let mut fleet = fleet.clone();
    let ship = fleet.ship_mut(kind).ok_or(EngineError::NoShipAtTarget)?;
    if ship.is_sunk() {
        return Err(EngineError::ShipSunk(kind));
    }
    if ship.is_shielded() {
        return Err(EngineError::AlreadyShielded(kind));
    }
    ship.raise_shield();
    debug!("shield raised on {}", kind);
    Ok(ShieldOutcome {
        kind,
        fleet,
        balance,
    })
}

/// One cell of a sonar sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannedCell {
    pub at: Coord,
    pub ship_present: bool,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanReport {
    pub center: Coord,
    /// Block cells clipped to the board, row-major.
    pub cells: Vec<ScannedCell>,
    pub balance: u32,
    /// How long the reveal should stay visible.
    pub display_ms: u64,
}

impl ScanReport {
    pub fn contacts(&self) -> usize {
        self.cells.iter().filter(|c| c.ship_present).count()
    }
}

/// Reveal which cells of the 3×3 block around `center` hold a ship. Resolves
/// nothing and does not use up the attack.
pub fn area_scan(grid: &Grid, center: Coord, balance: u32) -> Result<ScanReport, EngineError> {
    let balance = PowerUp::Scan.charge(balance)?;
    check_bounds(center)?;
    let cells = center
        .block()
        .filter_map(|at| {
            grid.cell(at).map(|cell| ScannedCell {
                at,
                ship_present: cell.occupant.is_some(),
                resolved: cell.is_resolved(),
            })
        })
        .collect();
    Ok(ScanReport {
        center,
        cells,
        balance,
        display_ms: SCAN_DISPLAY_MS,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeOutcome {
    pub center: Coord,
    /// Every sub-strike in the order it was resolved.
    pub shots: Vec<(Coord, ShotResult)>,
    pub grid: Grid,
    pub fleet: Fleet,
    pub cp_awarded: u32,
    /// Balance after the cost is paid and rewards are credited.
    pub balance: u32,
    /// At least one sub-strike damaged a ship.
    pub continue_turn: bool,
    pub fleet_destroyed: bool,
}

/// Resolve every open cell of the 3×3 block around `center`, one after the
/// other, on the evolving board. Already resolved cells are skipped.
pub fn area_strike(
    grid: &Grid,
    fleet: &Fleet,
    center: Coord,
    balance: u32,
) -> Result<StrikeOutcome, EngineError> {
    let balance = PowerUp::Strike.charge(balance)?;
    check_bounds(center)?;

    let mut grid = *grid;
    let mut fleet = fleet.clone();
    let mut shots = Vec::new();
    let mut cp_awarded = 0;
    for at in center.block() {
        if !grid.is_available(at) {
            continue;
        }
        let outcome = resolve_shot(&grid, &fleet, at)?;
        shots.push((at, outcome.result));
        cp_awarded += outcome.cp_awarded;
        grid = outcome.grid;
        fleet = outcome.fleet;
    }

    let continue_turn = shots.iter().any(|(_, result)| result.is_hit());
    debug!(
        "area strike at {}: {} cells, +{} CP",
        center,
        shots.len(),
        cp_awarded
    );
    Ok(StrikeOutcome {
        center,
        shots,
        fleet_destroyed: fleet.all_sunk(),
        grid,
        fleet,
        cp_awarded,
        balance: balance + cp_awarded,
        continue_turn,
    })
}
