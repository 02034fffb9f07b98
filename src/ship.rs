//! Ship catalog and placed ship instances.

use core::fmt;

use crate::common::Coord;
use crate::config::{
    SINK_BONUS_BATTLESHIP, SINK_BONUS_CARRIER, SINK_BONUS_DESTROYER, SINK_BONUS_PATROL_BOAT,
    SINK_BONUS_SUBMARINE,
};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        self == Orientation::Horizontal
    }

    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The other axis.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// The five ship types of a fleet. Each kind appears once per fleet, so a
/// kind alone identifies a ship on its own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
    PatrolBoat,
}

impl ShipKind {
    /// Ship's display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
            ShipKind::PatrolBoat => "Patrol Boat",
        }
    }

    /// Number of cells the ship covers.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Destroyer | ShipKind::Submarine => 3,
            ShipKind::PatrolBoat => 2,
        }
    }

    /// Icon identifier used by presentation layers.
    pub const fn icon(self) -> &'static str {
        match self {
            ShipKind::Carrier => "directions_boat",
            ShipKind::Battleship => "anchor",
            ShipKind::Destroyer => "rocket",
            ShipKind::Submarine => "waves",
            ShipKind::PatrolBoat => "speed",
        }
    }

    /// Command points awarded on top of the hit reward when this ship sinks.
    pub const fn sink_bonus(self) -> u32 {
        match self {
            ShipKind::Carrier => SINK_BONUS_CARRIER,
            ShipKind::Battleship => SINK_BONUS_BATTLESHIP,
            ShipKind::Destroyer => SINK_BONUS_DESTROYER,
            ShipKind::Submarine => SINK_BONUS_SUBMARINE,
            ShipKind::PatrolBoat => SINK_BONUS_PATROL_BOAT,
        }
    }

    /// Position in the catalog.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship placed on a grid. Damage is a counter; which cells were struck is
/// recorded on the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedShip {
    kind: ShipKind,
    anchor: Coord,
    orientation: Orientation,
    hits: usize,
    shielded: bool,
}

impl PlacedShip {
    /// A fresh, undamaged ship. Bounds and overlap are the grid's concern.
    pub fn new(kind: ShipKind, anchor: Coord, orientation: Orientation) -> Self {
        Self {
            kind,
            anchor,
            orientation,
            hits: 0,
            shielded: false,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.kind.length()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length()
    }

    /// Cells covered by the ship, walking from the anchor.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let Coord { x, y } = self.anchor;
        let horizontal = self.orientation.is_horizontal();
        (0..self.length()).map(move |i| {
            if horizontal {
                Coord::new(x.saturating_add(i), y)
            } else {
                Coord::new(x, y.saturating_add(i))
            }
        })
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells().any(|c| c == at)
    }

    /// Count one damaging hit. Saturates at the ship's length.
    pub(crate) fn register_hit(&mut self) {
        if self.hits < self.length() {
            self.hits += 1;
        }
    }

    pub(crate) fn raise_shield(&mut self) {
        self.shielded = true;
    }

    pub(crate) fn drop_shield(&mut self) {
        self.shielded = false;
    }
}

/// Boundary helper mirroring [`PlacedShip::is_sunk`].
pub fn is_sunk(ship: &PlacedShip) -> bool {
    ship.is_sunk()
}
