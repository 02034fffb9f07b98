use rand::Rng;

use crate::{
    ai::{select_computer_shot, Difficulty},
    common::Coord,
    fleet::{generate_fleet, Fleet},
    grid::Grid,
};

/// Interface implemented by the different kinds of commander a driver can
/// seat at a side.
pub trait Player {
    /// Deploy a complete fleet.
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Grid, Fleet);

    /// Choose the next strike against the opponent's board as this side
    /// sees it. `None` when no open cell is left.
    fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, observed: &Grid) -> Option<Coord>;
}

/// Computer commander using the hunt/search targeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputerPlayer {
    difficulty: Difficulty,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Player for ComputerPlayer {
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Grid, Fleet) {
        generate_fleet(rng)
    }

    fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, observed: &Grid) -> Option<Coord> {
        select_computer_shot(observed, self.difficulty, rng)
    }
}
