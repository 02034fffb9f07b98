//! Fleets: the ships of one side, random generation and manual deployment.

use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::common::{Coord, EngineError};
use crate::config::{GRID_SIZE, NUM_SHIPS, SHIP_ORDER};
use crate::grid::{can_place_ship, place_ship, Grid};
use crate::ship::{Orientation, PlacedShip, ShipKind};

/// Ships belonging to one side. Sunk ships stay in the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<PlacedShip>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    /// Build a fleet from ships, checking them against each other the same way
    /// a deployment would. Fails if a kind repeats, a ship leaves the board or
    /// two ships overlap.
    pub fn from_ships(ships: Vec<PlacedShip>) -> Result<Self, EngineError> {
        let mut fleet = Fleet::new();
        let mut layout = Grid::new();
        for ship in ships {
            if fleet.ship(ship.kind()).is_some() {
                return Err(EngineError::ShipAlreadyPlaced(ship.kind()));
            }
            layout = place_ship(&layout, ship.kind(), ship.anchor(), ship.orientation())?.0;
            fleet.ships.push(ship);
        }
        Ok(fleet)
    }

    /// Check that `grid` marks exactly this fleet's cells with the right
    /// ship, and nothing else.
    pub fn check_layout(&self, grid: &Grid) -> Result<(), EngineError> {
        for (at, cell) in grid.iter() {
            let expected = self.ships.iter().find(|s| s.contains(at)).map(PlacedShip::kind);
            if cell.occupant != expected {
                return Err(EngineError::FleetGridMismatch { x: at.x, y: at.y });
            }
        }
        Ok(())
    }

    pub fn ships(&self) -> &[PlacedShip] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&PlacedShip> {
        self.ships.iter().find(|s| s.kind() == kind)
    }

    pub(crate) fn ship_mut(&mut self, kind: ShipKind) -> Option<&mut PlacedShip> {
        self.ships.iter_mut().find(|s| s.kind() == kind)
    }

    /// One ship of every catalog kind.
    pub fn is_complete(&self) -> bool {
        self.ships.len() == NUM_SHIPS && SHIP_ORDER.iter().all(|&kind| self.ship(kind).is_some())
    }

    /// Every ship sunk. An empty fleet has nothing left to sink but has not
    /// lost either, so it reports `false`.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(PlacedShip::is_sunk)
    }

    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

}

/// Random anchor and orientation that keep a ship of `length` on the board.
/// Overlap is not checked.
fn random_anchor<R: Rng + ?Sized>(rng: &mut R, length: usize) -> (Coord, Orientation) {
    let orientation = if rng.random() {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let span = GRID_SIZE - length + 1;
    let (max_x, max_y) = match orientation {
        Orientation::Horizontal => (span, GRID_SIZE),
        Orientation::Vertical => (GRID_SIZE, span),
    };
    let at = Coord::new(rng.random_range(0..max_x), rng.random_range(0..max_y));
    (at, orientation)
}

/// Place `kind` at random on `grid`, sampling until the placement is valid.
/// A free spot always exists for the standard fleet on a 10×10 board.
fn place_randomly<R: Rng + ?Sized>(rng: &mut R, grid: &Grid, kind: ShipKind) -> (Grid, PlacedShip) {
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let (at, orientation) = random_anchor(rng, kind.length());
        if let Ok(placed) = place_ship(grid, kind, at, orientation) {
            debug!("placed {} at {} after {} attempts", kind, at, attempts);
            return placed;
        }
    }
}

/// Generate a complete fleet on a fresh grid, in catalog order.
pub fn generate_fleet<R: Rng + ?Sized>(rng: &mut R) -> (Grid, Fleet) {
    let mut deployment = Deployment::new();
    deployment.auto_arrange(rng);
    (deployment.grid, deployment.fleet)
}

/// Manual fleet deployment in catalog order, as done on the setup screen.
#[derive(Debug, Clone, Default)]
pub struct Deployment {
    grid: Grid,
    fleet: Fleet,
}

impl Deployment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Next kind awaiting placement, `None` once the fleet is complete.
    pub fn next_kind(&self) -> Option<ShipKind> {
        SHIP_ORDER
            .iter()
            .copied()
            .find(|&kind| self.fleet.ship(kind).is_none())
    }

    /// Whether the next ship would fit at `at`.
    pub fn can_place(&self, at: Coord, orientation: Orientation) -> bool {
        self.next_kind().is_some_and(|kind| {
            can_place_ship(&self.grid, at.x, at.y, kind.length(), orientation.is_horizontal())
        })
    }

    /// Place the next ship. On error nothing changes.
    pub fn place(&mut self, at: Coord, orientation: Orientation) -> Result<ShipKind, EngineError> {
        let kind = self.next_kind().ok_or(EngineError::FleetComplete)?;
        let (grid, ship) = place_ship(&self.grid, kind, at, orientation)?;
        self.fleet.ships.push(ship);
        self.grid = grid;
        Ok(kind)
    }

    /// Clear the board and start over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Randomly place every remaining ship.
    pub fn auto_arrange<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while let Some(kind) = self.next_kind() {
            let (grid, ship) = place_randomly(rng, &self.grid, kind);
            self.fleet.ships.push(ship);
            self.grid = grid;
        }
    }

    /// Hand over the deployed grid and fleet.
    pub fn finish(self) -> Result<(Grid, Fleet), EngineError> {
        if !self.fleet.is_complete() {
            return Err(EngineError::IncompleteFleet {
                placed: self.fleet.len(),
            });
        }
        Ok((self.grid, self.fleet))
    }
}
