//! Board cells, placement validation and the attacker's fogged view.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{check_bounds, Coord, EngineError};
use crate::config::GRID_SIZE;
use crate::ship::{Orientation, PlacedShip, ShipKind};

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Empty,
    Occupied,
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub status: CellStatus,
    /// Ship covering the cell; kept on hit cells so a hit reveals its type.
    pub occupant: Option<ShipKind>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        status: CellStatus::Empty,
        occupant: None,
    };

    /// Hit and miss are terminal.
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, CellStatus::Hit | CellStatus::Miss)
    }
}

/// A 10×10 board indexed `[y][x]`.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

/// Create a grid where every cell is empty.
pub fn create_empty_grid() -> Grid {
    Grid::new()
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Cell at `at`, `None` off the board.
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        at.in_bounds().then(|| self.cells[at.y][at.x])
    }

    pub fn status(&self, at: Coord) -> Option<CellStatus> {
        self.cell(at).map(|c| c.status)
    }

    /// In bounds and not yet hit or missed.
    pub fn is_available(&self, at: Coord) -> bool {
        self.cell(at).is_some_and(|c| !c.is_resolved())
    }

    /// Every coordinate in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Coord::new(x, y)))
    }

    /// Row-major iteration over coordinates and cells.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Self::coords().map(move |at| (at, self.cells[at.y][at.x]))
    }

    pub fn unresolved_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| !cell.is_resolved())
            .map(|(at, _)| at)
            .collect()
    }

    pub fn count(&self, status: CellStatus) -> usize {
        self.iter().filter(|(_, cell)| cell.status == status).count()
    }

    pub fn hit_count(&self) -> usize {
        self.count(CellStatus::Hit)
    }

    /// Resolved cells. A strike absorbed by a shield leaves its cell
    /// unresolved and is not counted.
    pub fn shots_fired(&self) -> usize {
        self.hit_count() + self.count(CellStatus::Miss)
    }

    /// Percentage of resolved cells that were hits, rounded. Zero before the
    /// first shot. Shield absorptions count neither way.
    pub fn accuracy(&self) -> u32 {
        let total = self.shots_fired();
        if total == 0 {
            return 0;
        }
        ((self.hit_count() * 100 + total / 2) / total) as u32
    }

    /// The board as the attacker sees it: unstruck ships are hidden, hit
    /// cells keep their occupant.
    pub fn fogged(&self) -> Grid {
        let mut view = *self;
        for row in view.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.status == CellStatus::Occupied {
                    *cell = Cell::EMPTY;
                }
            }
        }
        view
    }

    pub(crate) fn set_status(&mut self, at: Coord, status: CellStatus) {
        self.cells[at.y][at.x].status = status;
    }

    pub(crate) fn set_cell(&mut self, at: Coord, cell: Cell) {
        self.cells[at.y][at.x] = cell;
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a ship of `length` fits at (`x`, `y`) without leaving the board
/// or covering an occupied cell. Touching other ships is allowed.
pub fn can_place_ship(grid: &Grid, x: usize, y: usize, length: usize, horizontal: bool) -> bool {
    (0..length).all(|i| {
        let at = if horizontal {
            x.checked_add(i).map(|x| Coord::new(x, y))
        } else {
            y.checked_add(i).map(|y| Coord::new(x, y))
        };
        at.and_then(|at| grid.status(at))
            .is_some_and(|status| status != CellStatus::Occupied)
    })
}

/// Commit a ship to a copy of `grid`, marking its cells occupied.
pub fn place_ship(
    grid: &Grid,
    kind: ShipKind,
    anchor: Coord,
    orientation: Orientation,
) -> Result<(Grid, PlacedShip), EngineError> {
    check_bounds(anchor)?;
    let ship = PlacedShip::new(kind, anchor, orientation);
    if let Some(outside) = ship.cells().find(|c| !c.in_bounds()) {
        return Err(EngineError::OutOfBounds {
            x: outside.x,
            y: outside.y,
        });
    }
    if !can_place_ship(grid, anchor.x, anchor.y, kind.length(), orientation.is_horizontal()) {
        return Err(EngineError::ShipOverlaps);
    }
    let mut placed = *grid;
    for at in ship.cells() {
        placed.set_cell(
            at,
            Cell {
                status: CellStatus::Occupied,
                occupant: Some(kind),
            },
        );
    }
    Ok((placed, ship))
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid:")?;
        write!(f, "{}", self)
    }
}

impl fmt::Display for Grid {
    /// `.` empty, `S` ship, `X` hit, `o` miss.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            for cell in row.iter() {
                let ch = match cell.status {
                    CellStatus::Empty => '.',
                    CellStatus::Occupied => 'S',
                    CellStatus::Hit => 'X',
                    CellStatus::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            if y + 1 < GRID_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
