//! Commonly used types and utilities for ease of import.

pub use crate::{
    can_place_ship, create_empty_grid, generate_fleet, is_sunk, resolve_shot,
    select_computer_shot, ComputerPlayer, Coord, Deployment, Difficulty, EngineError, Fleet,
    Grid, Mode, Orientation, Player, PowerUp, Session, ShipKind, ShotResult, Side,
};

#[cfg(feature = "std")]
pub use crate::commentary::{spawn_insight, tactical_insight, Commentator, CommentaryRequest};
#[cfg(feature = "std")]
pub use crate::init_logging;
