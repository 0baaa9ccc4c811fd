//! Game session: setup intents, the turn controller and win detection.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use log::{debug, info};
use rand::Rng;

use crate::board::Board;
use crate::common::{GameError, ShotOutcome};
use crate::player::{Controller, Player};
use crate::ship::Orientation;

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Both sides are placing ships.
    Setup,
    /// Shots are being exchanged.
    Battle,
    /// Somebody ran out of ships. Terminal.
    Over { winner: Side },
}

/// What one resolved shot did; the presentation layer renders from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub row: usize,
    pub col: usize,
    pub outcome: ShotOutcome,
    /// Set when this shot ended the game.
    pub winner: Option<Side>,
}

/// A full game: two players, whose turn it is and the lifecycle phase.
/// This is the unit of save/load.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSession {
    players: [Player; 2],
    turn: Side,
    phase: GamePhase,
}

impl GameSession {
    /// Fresh session in setup phase.
    pub fn new(one: Controller, two: Controller) -> Self {
        GameSession {
            players: [Player::new(one), Player::new(two)],
            turn: Side::One,
            phase: GamePhase::Setup,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Side currently holding the turn.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Read access to a side's board for rendering.
    pub fn board(&self, side: Side) -> &Board {
        &self.players[side.index()].board
    }

    /// The hunter driving `side`, when it is computer controlled.
    pub fn hunter(&self, side: Side) -> Option<&crate::ai::Hunter> {
        match &self.players[side.index()].controller {
            Controller::Computer(hunter) => Some(hunter),
            Controller::Human => None,
        }
    }

    fn in_setup(&self, side: Side) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup || self.players[side.index()].ready {
            return Err(GameError::WrongPhase);
        }
        Ok(())
    }

    /// Place fleet ship `index` for `side`. The position must satisfy
    /// [`Board::is_position_valid`]; invalid requests are rejected, never
    /// corrected.
    pub fn place_ship(
        &mut self,
        side: Side,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.in_setup(side)?;
        self.players[side.index()].board.place(index, row, col, orientation)?;
        debug!("side {:?} placed ship {} at ({}, {})", side, index, row, col);
        Ok(())
    }

    /// Pick the ship covering (`row`, `col`) back up; returns its fleet
    /// index so the UI can re-select it.
    pub fn remove_ship_at(
        &mut self,
        side: Side,
        row: usize,
        col: usize,
    ) -> Result<usize, GameError> {
        self.in_setup(side)?;
        let board = &mut self.players[side.index()].board;
        let index = board.ship_at(row, col).ok_or(GameError::NoShipThere)?;
        board.remove(index)?;
        Ok(index)
    }

    /// Throw away `side`'s placement and place the whole fleet at random.
    pub fn randomize_placement<R: Rng>(&mut self, side: Side, rng: &mut R) -> Result<(), GameError> {
        self.in_setup(side)?;
        self.players[side.index()].board.place_random_fleet(rng)
    }

    /// Clear `side`'s board back to an empty setup state.
    pub fn reset_placement(&mut self, side: Side) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::WrongPhase);
        }
        let player = &mut self.players[side.index()];
        player.board.reset();
        player.ready = false;
        Ok(())
    }

    /// Lock in `side`'s placement. When both sides are ready the battle
    /// starts and side one shoots first.
    pub fn finish_placement(&mut self, side: Side) -> Result<(), GameError> {
        self.in_setup(side)?;
        if !self.players[side.index()].board.all_placed() {
            return Err(GameError::FleetIncomplete);
        }
        self.players[side.index()].ready = true;
        if self.players.iter().all(|p| p.ready) {
            self.phase = GamePhase::Battle;
            self.turn = Side::One;
            self.players[Side::One.index()].can_shoot = true;
            info!("all fleets placed, battle begins");
        }
        Ok(())
    }

    /// Fire at the opponent of `side`.
    ///
    /// Rejected without state change when the phase or turn is wrong, the
    /// streak is spent, or the cell was shot before. A miss ends the streak;
    /// the win check runs immediately after every resolved shot.
    pub fn fire(&mut self, side: Side, row: usize, col: usize) -> Result<ShotReport, GameError> {
        if self.phase != GamePhase::Battle {
            return Err(GameError::WrongPhase);
        }
        if side != self.turn {
            return Err(GameError::NotYourTurn);
        }
        if !self.players[side.index()].can_shoot {
            return Err(GameError::TurnSpent);
        }

        let enemy = &mut self.players[side.opponent().index()];
        let outcome = enemy.board.apply_shot(row, col)?;
        let mut winner = None;
        match outcome {
            ShotOutcome::Duplicate => return Err(GameError::DuplicateShot),
            ShotOutcome::Miss => {
                debug!("{:?} fired ({}, {}): miss", side, row, col);
                self.players[side.index()].can_shoot = false;
            }
            ShotOutcome::Hit => {
                debug!("{:?} fired ({}, {}): hit", side, row, col);
            }
            ShotOutcome::Sunk(kind) => {
                info!("{:?} sank the {}", side, kind.name());
                if self.players[side.opponent().index()].board.ships_remaining() == 0 {
                    self.phase = GamePhase::Over { winner: side };
                    winner = Some(side);
                    info!("{:?} wins", side);
                }
            }
        }
        Ok(ShotReport {
            row,
            col,
            outcome,
            winner,
        })
    }

    /// Hand the turn over. Deliberately a second step after the miss that
    /// ended the streak, so a UI can show the turn result before control
    /// flips. Returns the side now holding the turn.
    pub fn finish_turn(&mut self, side: Side) -> Result<Side, GameError> {
        if self.phase != GamePhase::Battle {
            return Err(GameError::WrongPhase);
        }
        if side != self.turn {
            return Err(GameError::NotYourTurn);
        }
        if self.players[side.index()].can_shoot {
            return Err(GameError::TurnStillLive);
        }
        self.turn = side.opponent();
        self.players[self.turn.index()].can_shoot = true;
        debug!("turn passes to {:?}", self.turn);
        Ok(self.turn)
    }

    /// Drive a computer-controlled side through its whole turn: choose,
    /// fire and digest until the first miss or the end of the game, then
    /// finish the turn through the same two-step path a human uses.
    pub fn run_computer_turn<R: Rng>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<Vec<ShotReport>, GameError> {
        if self.phase != GamePhase::Battle {
            return Err(GameError::WrongPhase);
        }
        if side != self.turn {
            return Err(GameError::NotYourTurn);
        }
        let mut hunter = match &self.players[side.index()].controller {
            Controller::Computer(hunter) => hunter.clone(),
            Controller::Human => return Err(GameError::NotComputer),
        };

        let mut reports = Vec::new();
        loop {
            let enemy = &self.players[side.opponent().index()].board;
            let Some((row, col)) = hunter.choose(rng, enemy) else {
                break;
            };
            let report = self.fire(side, row, col)?;
            hunter.observe(rng, (row, col), report.outcome);
            let done = report.outcome == ShotOutcome::Miss || report.winner.is_some();
            reports.push(report);
            if done {
                break;
            }
        }
        self.players[side.index()].controller = Controller::Computer(hunter);

        if self.phase == GamePhase::Battle && !self.players[side.index()].can_shoot {
            self.finish_turn(side)?;
        }
        Ok(reports)
    }

    /// Structural sanity of both boards; used when restoring snapshots.
    pub fn is_consistent(&self) -> bool {
        self.players.iter().all(|p| p.board.is_consistent())
    }
}
