//! Common types for the engine: coordinates, shot results and errors.

use core::fmt;

use crate::config::GRID_SIZE;
use crate::ship::ShipKind;

/// A board coordinate; `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Shift by a signed delta, `None` when the result leaves the board.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let moved = Coord::new(x, y);
        moved.in_bounds().then_some(moved)
    }

    /// In-bounds orthogonal neighbors: right, left, down, up.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds cells of the 3×3 block centered here, row-major.
    pub fn block(self) -> impl Iterator<Item = Coord> {
        (-1isize..=1).flat_map(move |dy| (-1isize..=1).filter_map(move |dx| self.offset(dx, dy)))
    }

    /// Checkerboard color used by the parity search.
    pub fn is_even_parity(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl fmt::Display for Coord {
    /// Column letter and 1-based row, e.g. `C-4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + (self.x % 26) as u8) as char;
        write!(f, "{}-{}", col, self.y + 1)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

/// Result of resolving a single strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Strike landed on open water.
    Miss,
    /// Strike damaged a ship that is still afloat.
    Hit(ShipKind),
    /// Strike sank the ship.
    Sunk(ShipKind),
    /// A shield soaked up the strike; the ship is undamaged.
    Absorbed(ShipKind),
}

impl ShotResult {
    /// Whether the strike damaged a ship.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit(_) | ShotResult::Sunk(_))
    }
}

/// Errors returned by engine operations. None of them leave partial state
/// behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate lies outside the board.
    OutOfBounds { x: usize, y: usize },
    /// Cell was already hit or missed.
    AlreadyResolved { x: usize, y: usize },
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship of this kind is already on the board.
    ShipAlreadyPlaced(ShipKind),
    /// Every ship of the catalog is already deployed.
    FleetComplete,
    /// Fleet is missing ships.
    IncompleteFleet { placed: usize },
    /// Grid marks a ship the fleet does not contain.
    UnknownShip(ShipKind),
    /// Grid cell disagrees with the fleet about which ship covers it.
    FleetGridMismatch { x: usize, y: usize },
    /// Not enough command points for a power-up.
    InsufficientCp { cost: u32, balance: u32 },
    /// Shield target holds no friendly ship.
    NoShipAtTarget,
    /// Shield target ship is already sunk.
    ShipSunk(ShipKind),
    /// Shield target ship already carries a shield.
    AlreadyShielded(ShipKind),
    /// Match already has a winner.
    GameOver,
    /// Current attacker is not computer controlled.
    NotComputerTurn,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OutOfBounds { x, y } => {
                write!(f, "Coordinate ({}, {}) is outside the board", x, y)
            }
            EngineError::AlreadyResolved { x, y } => {
                write!(f, "Cell {} was already struck", Coord::new(*x, *y))
            }
            EngineError::ShipOverlaps => write!(f, "Ship placement overlaps another ship"),
            EngineError::ShipAlreadyPlaced(kind) => write!(f, "{} is already deployed", kind),
            EngineError::FleetComplete => write!(f, "All ships are already deployed"),
            EngineError::IncompleteFleet { placed } => {
                write!(f, "Fleet incomplete: {} of 5 ships deployed", placed)
            }
            EngineError::UnknownShip(kind) => write!(f, "No {} in the defending fleet", kind),
            EngineError::FleetGridMismatch { x, y } => {
                write!(f, "Board and fleet disagree at {}", Coord::new(*x, *y))
            }
            EngineError::InsufficientCp { cost, balance } => {
                write!(f, "Insufficient command points: need {}, have {}", cost, balance)
            }
            EngineError::NoShipAtTarget => write!(f, "No friendly ship at target"),
            EngineError::ShipSunk(kind) => write!(f, "{} is already sunk", kind),
            EngineError::AlreadyShielded(kind) => write!(f, "{} is already shielded", kind),
            EngineError::GameOver => write!(f, "Match is already decided"),
            EngineError::NotComputerTurn => write!(f, "It is not the computer's turn"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Reject coordinates off the board.
pub(crate) fn check_bounds(at: Coord) -> Result<(), EngineError> {
    if at.in_bounds() {
        Ok(())
    } else {
        Err(EngineError::OutOfBounds { x: at.x, y: at.y })
    }
}
