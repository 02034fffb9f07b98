#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod common;
mod config;
mod fleet;
mod grid;
mod player;
mod powerup;
mod resolver;
mod session;
mod ship;
#[cfg(feature = "std")]
pub mod commentary;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use grid::*;
pub use player::*;
pub use powerup::*;
pub use resolver::*;
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
