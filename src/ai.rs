// Hunt/search targeting for the computer opponent.
// Reads only what an attacker can see: hit and miss cells, plus the ship
// type a hit reveals.

use alloc::vec::Vec;
use core::{fmt, str::FromStr};
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    common::Coord,
    config::{GRID_SIZE, HARD_PARITY_ATTEMPTS, MEDIUM_PARITY_ATTEMPTS, NUM_SHIPS, SHIP_ORDER},
    grid::{CellStatus, Grid},
};

/// Computer opponent strength. Scales how hard the search phase leans on
/// the checkerboard pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parity samples tried before falling back to a uniform pick.
    pub fn parity_attempts(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => MEDIUM_PARITY_ATTEMPTS,
            Difficulty::Hard => HARD_PARITY_ATTEMPTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised difficulty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "difficulty must be one of: easy, medium, hard")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(name))
            .ok_or(ParseDifficultyError)
    }
}

/// Hits on ships that are still afloat, grouped per ship in catalog order.
/// A ship counts as afloat while its visible hits are fewer than its length.
fn active_hit_groups(observed: &Grid) -> Vec<Vec<Coord>> {
    let mut groups: [Vec<Coord>; NUM_SHIPS] = Default::default();
    for (at, cell) in observed.iter() {
        if let (CellStatus::Hit, Some(kind)) = (cell.status, cell.occupant) {
            groups[kind.index()].push(at);
        }
    }
    SHIP_ORDER
        .iter()
        .zip(groups)
        .filter(|(kind, hits)| !hits.is_empty() && hits.len() < kind.length())
        .map(|(_, hits)| hits)
        .collect()
}

/// Cell just past either end of a line of hits: the far end first, then the
/// near end.
fn line_extension(observed: &Grid, hits: &[Coord]) -> Option<Coord> {
    let horizontal = hits[0].y == hits[1].y;
    let (min_x, max_x) = bounds(hits.iter().map(|h| h.x))?;
    let (min_y, max_y) = bounds(hits.iter().map(|h| h.y))?;
    let ends = if horizontal {
        [
            Coord::new(max_x, min_y).offset(1, 0),
            Coord::new(min_x, min_y).offset(-1, 0),
        ]
    } else {
        [
            Coord::new(min_x, max_y).offset(0, 1),
            Coord::new(min_x, min_y).offset(0, -1),
        ]
    };
    ends.into_iter()
        .flatten()
        .find(|&at| observed.is_available(at))
}

fn bounds(values: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Finish off damaged ships. Returns `None` when no live ship has been hit
/// or every cell around the known hits is already resolved.
fn hunt_target<R: Rng + ?Sized>(observed: &Grid, rng: &mut R) -> Option<Coord> {
    for hits in active_hit_groups(observed) {
        if hits.len() >= 2 {
            if let Some(at) = line_extension(observed, &hits) {
                debug!("hunt: extending line of {} hits to {}", hits.len(), at);
                return Some(at);
            }
        }
        let mut around: Vec<Coord> = hits.iter().flat_map(|h| h.neighbors()).collect();
        around.shuffle(rng);
        if let Some(at) = around.into_iter().find(|&at| observed.is_available(at)) {
            debug!("hunt: probing neighbor {}", at);
            return Some(at);
        }
    }
    None
}

/// No damaged ship to chase: sample the even checkerboard color for as many
/// attempts as the difficulty allows, then pick uniformly among open cells.
fn search_target<R: Rng + ?Sized>(
    observed: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Coord> {
    for _ in 0..difficulty.parity_attempts() {
        let at = Coord::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if at.is_even_parity() && observed.is_available(at) {
            return Some(at);
        }
    }
    let open = observed.unresolved_cells();
    if open.is_empty() {
        return None;
    }
    let at = open[rng.random_range(0..open.len())];
    debug!("search: uniform pick {} of {} open cells", at, open.len());
    Some(at)
}

/// Choose the computer's next strike on `observed`.
///
/// The result is always in bounds and unresolved; `None` means no such cell
/// is left. Pass [`Grid::fogged`] to keep unhit ships hidden, although only
/// hit/miss state and the occupant of hit cells are consulted.
pub fn select_computer_shot<R: Rng + ?Sized>(
    observed: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Coord> {
    hunt_target(observed, rng).or_else(|| search_target(observed, difficulty, rng))
}
