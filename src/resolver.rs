//! Shot resolution against a defending grid and fleet.
//!
//! Resolution is value based: the caller's grid and fleet are never touched,
//! the updated copies travel back in the [`ShotOutcome`].

use log::debug;

use crate::common::{Coord, EngineError, ShotResult};
use crate::config::HIT_REWARD;
use crate::fleet::Fleet;
use crate::grid::{CellStatus, Grid};

/// Everything a single strike changed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    pub at: Coord,
    pub result: ShotResult,
    pub grid: Grid,
    pub fleet: Fleet,
    /// Command points earned by the attacker.
    pub cp_awarded: u32,
    /// The attacker fires again.
    pub continue_turn: bool,
    /// The defending fleet is gone; this overrides `continue_turn`.
    pub fleet_destroyed: bool,
}

/// Resolve a strike at `at`.
///
/// Out-of-bounds coordinates and cells already hit or missed are rejected
/// before anything is computed. A shielded ship loses its shield instead of
/// taking damage, and the struck cell stays occupied so it can be targeted
/// again.
pub fn resolve_shot(grid: &Grid, fleet: &Fleet, at: Coord) -> Result<ShotOutcome, EngineError> {
    let cell = grid.cell(at).ok_or(EngineError::OutOfBounds { x: at.x, y: at.y })?;
    if cell.is_resolved() {
        return Err(EngineError::AlreadyResolved { x: at.x, y: at.y });
    }

    let mut grid = *grid;
    let mut fleet = fleet.clone();

    let (result, cp_awarded) = match (cell.status, cell.occupant) {
        (CellStatus::Occupied, Some(kind)) => {
            let ship = fleet.ship_mut(kind).ok_or(EngineError::UnknownShip(kind))?;
            if ship.is_shielded() {
                ship.drop_shield();
                (ShotResult::Absorbed(kind), 0)
            } else {
                ship.register_hit();
                grid.set_status(at, CellStatus::Hit);
                if ship.is_sunk() {
                    (ShotResult::Sunk(kind), HIT_REWARD + kind.sink_bonus())
                } else {
                    (ShotResult::Hit(kind), HIT_REWARD)
                }
            }
        }
        _ => {
            grid.set_status(at, CellStatus::Miss);
            (ShotResult::Miss, 0)
        }
    };

    let fleet_destroyed = fleet.all_sunk();
    debug!("strike at {}: {:?}, +{} CP", at, result, cp_awarded);
    Ok(ShotOutcome {
        at,
        result,
        grid,
        fleet,
        cp_awarded,
        continue_turn: result.is_hit(),
        fleet_destroyed,
    })
}
