//! Player aggregate: a board plus who drives it.

use crate::ai::Hunter;
use crate::board::Board;

/// Who chooses this player's shots. Computer players carry their hunter's
/// working memory so it survives turn boundaries (and snapshots).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Human,
    Computer(Hunter),
}

/// One side of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub(crate) board: Board,
    pub(crate) controller: Controller,
    /// True while the side's shooting streak is live; a miss clears it.
    pub(crate) can_shoot: bool,
    /// Set by finishing placement; both sides ready starts the battle.
    pub(crate) ready: bool,
}

impl Player {
    pub fn new(controller: Controller) -> Self {
        Player {
            board: Board::new(),
            controller,
            can_shoot: false,
            ready: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.controller, Controller::Computer(_))
    }

    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    pub fn ready(&self) -> bool {
        self.ready
    }
}
