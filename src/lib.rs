#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod mask;
mod player;
#[cfg(feature = "std")]
mod save;
mod ship;

pub use ai::{Heading, HuntPhase, Hunter, HUNT_SEGMENT_LIMIT};
pub use board::{Board, BoardMask, BoardShip, CellView};
pub use common::{GameError, ShotOutcome};
pub use config::{BOARD_SIZE, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS};
pub use game::{GamePhase, GameSession, ShotReport, Side};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use mask::{Mask, MaskError};
pub use player::{Controller, Player};
#[cfg(feature = "std")]
pub use save::{load, save, SaveError, SAVE_MAGIC, SAVE_VERSION};
pub use ship::{Orientation, Ship, ShipKind};
