//! Shot outcomes and the crate-wide error type.

use core::fmt;

use crate::mask::MaskError;
use crate::ship::ShipKind;

/// Result of resolving one shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The cell was shot before. The resolver leaves all state untouched;
    /// callers are expected to prevent this by construction.
    Duplicate,
    /// Open water.
    Miss,
    /// A ship segment, ship still afloat.
    Hit,
    /// The shot completed the named ship.
    Sunk(ShipKind),
}

/// Errors returned by board and session operations.
///
/// Every expected rejection (bad placement, duplicate shot, acting out of
/// turn) is a variant here; none of them mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Underlying grid index error.
    Grid(MaskError),
    /// Ship index outside the fleet roster.
    InvalidIndex,
    /// Placement footprint leaves the grid.
    OutOfBounds,
    /// Placement footprint crosses an already placed ship.
    Overlap,
    /// The ship is already on the board.
    ShipAlreadyPlaced,
    /// No ship covers the addressed cell.
    NoShipThere,
    /// Placement cannot finish until the whole fleet is down.
    FleetIncomplete,
    /// Random placement found no free position.
    UnableToPlaceShip,
    /// The cell was already shot.
    DuplicateShot,
    /// The acting side does not hold the turn.
    NotYourTurn,
    /// A miss ended the shooting streak; the turn must be finished first.
    TurnSpent,
    /// The turn cannot be finished while the side may still shoot.
    TurnStillLive,
    /// The operation is not legal in the current game phase.
    WrongPhase,
    /// The addressed player is not computer controlled.
    NotComputer,
    /// Occupancy bookkeeping disagrees with the ship list.
    CorruptBoard,
}

impl From<MaskError> for GameError {
    fn from(err: MaskError) -> Self {
        GameError::Grid(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Grid(e) => write!(f, "grid error: {}", e),
            GameError::InvalidIndex => write!(f, "ship index outside the fleet"),
            GameError::OutOfBounds => write!(f, "placement leaves the grid"),
            GameError::Overlap => write!(f, "placement overlaps another ship"),
            GameError::ShipAlreadyPlaced => write!(f, "ship is already placed"),
            GameError::NoShipThere => write!(f, "no ship at that cell"),
            GameError::FleetIncomplete => write!(f, "not all ships are placed"),
            GameError::UnableToPlaceShip => write!(f, "no free position for the ship"),
            GameError::DuplicateShot => write!(f, "cell was already shot"),
            GameError::NotYourTurn => write!(f, "not this side's turn"),
            GameError::TurnSpent => write!(f, "shooting streak already ended"),
            GameError::TurnStillLive => write!(f, "turn is still live"),
            GameError::WrongPhase => write!(f, "operation not legal in this phase"),
            GameError::NotComputer => write!(f, "player is not computer controlled"),
            GameError::CorruptBoard => write!(f, "board state is inconsistent"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
