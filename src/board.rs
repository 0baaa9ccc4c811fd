//! Board state and shot resolution for one player's waters.

use core::fmt;
use rand::Rng;

use crate::common::{GameError, ShotOutcome};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::mask::Mask;
use crate::ship::{Orientation, Ship};

/// Mask sized for the game grid.
pub type BoardMask = Mask<u128, BOARD_SIZE>;
/// Ship sized for the game grid.
pub type BoardShip = Ship<u128, BOARD_SIZE>;

/// Random placement gives up sampling after this many rejected draws and
/// scans the grid instead.
const PLACEMENT_ATTEMPTS: usize = 100;

/// Read-only cell view for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub occupied: bool,
    pub hit: bool,
    /// Fleet index of the covering ship, if any.
    pub ship: Option<usize>,
}

/// One player's board: the fleet, its occupancy union and every shot taken
/// against it. Shots are monotonic; only [`Board::reset`] clears them.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    ships: [Option<BoardShip>; NUM_SHIPS],
    ship_map: BoardMask,
    shots: BoardMask,
}

impl Board {
    /// Empty board, nothing placed, nothing shot.
    pub fn new() -> Self {
        Board {
            ships: [None; NUM_SHIPS],
            ship_map: BoardMask::new(),
            shots: BoardMask::new(),
        }
    }

    /// Wholesale reset back to the empty board (placement restart).
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Pure placement query: true when every footprint cell is on the grid
    /// and unoccupied. Callers run this before [`Board::place`]; it never
    /// mutates anything.
    pub fn is_position_valid(
        &self,
        len: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> bool {
        for k in 0..len {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + k),
                Orientation::Vertical => (row + k, col),
            };
            if r >= BOARD_SIZE || c >= BOARD_SIZE {
                return false;
            }
            if self.ship_map.get(r, c).unwrap_or(false) {
                return false;
            }
        }
        true
    }

    /// Place the fleet ship `index` at (`row`, `col`). Bounds and overlap
    /// are re-checked structurally so a skipped validity query cannot
    /// corrupt the occupancy union.
    pub fn place(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if index >= NUM_SHIPS {
            return Err(GameError::InvalidIndex);
        }
        if self.ships[index].is_some() {
            return Err(GameError::ShipAlreadyPlaced);
        }
        let ship = BoardShip::new(FLEET[index], orientation, row, col)?;
        if !(self.ship_map & ship.mask()).is_empty() {
            return Err(GameError::Overlap);
        }
        self.ship_map |= ship.mask();
        self.ships[index] = Some(ship);
        Ok(())
    }

    /// Pick a placed ship back up (setup phase). Clears its cells from the
    /// occupancy union; other ships are untouched.
    pub fn remove(&mut self, index: usize) -> Result<(), GameError> {
        if index >= NUM_SHIPS {
            return Err(GameError::InvalidIndex);
        }
        match self.ships[index].take() {
            Some(ship) => {
                self.ship_map &= !ship.mask();
                Ok(())
            }
            None => Err(GameError::NoShipThere),
        }
    }

    /// Fleet index of the ship covering (`row`, `col`), if any. Used by the
    /// setup UI to re-select a placed ship by clicking it.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships
            .iter()
            .position(|slot| slot.map_or(false, |ship| ship.covers(row, col)))
    }

    /// Draw a random valid (row, col, orientation) for fleet ship `index`.
    ///
    /// Rejection-samples up to [`PLACEMENT_ATTEMPTS`] draws, then falls back
    /// to an exhaustive scan. Starvation is practically impossible on a
    /// 10×10 board, but the scan bounds the worst case.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        index: usize,
    ) -> Result<(usize, usize, Orientation), GameError> {
        if index >= NUM_SHIPS {
            return Err(GameError::InvalidIndex);
        }
        let len = FLEET[index].length();

        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - len),
                Orientation::Vertical => (BOARD_SIZE - len, BOARD_SIZE - 1),
            };
            let row = rng.random_range(0..=max_r);
            let col = rng.random_range(0..=max_c);
            if self.is_position_valid(len, row, col, orientation) {
                return Ok((row, col, orientation));
            }
        }

        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    if self.is_position_valid(len, row, col, orientation) {
                        return Ok((row, col, orientation));
                    }
                }
            }
        }
        Err(GameError::UnableToPlaceShip)
    }

    /// Reset the board and place the whole fleet at random, roster order.
    pub fn place_random_fleet<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.reset();
        for index in 0..NUM_SHIPS {
            let (row, col, orientation) = self.random_placement(rng, index)?;
            self.place(index, row, col, orientation)?;
        }
        Ok(())
    }

    /// Resolve a shot at (`row`, `col`).
    ///
    /// A repeated shot returns [`ShotOutcome::Duplicate`] without touching
    /// anything, so hit counts and the sunk tally can never double-count.
    pub fn apply_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GameError> {
        if self.shots.get(row, col)? {
            return Ok(ShotOutcome::Duplicate);
        }
        self.shots.set(row, col)?;

        if !self.ship_map.get(row, col)? {
            return Ok(ShotOutcome::Miss);
        }
        for slot in self.ships.iter_mut() {
            if let Some(ship) = slot {
                if ship.take_hit(row, col) {
                    return Ok(if ship.is_sunk() {
                        ShotOutcome::Sunk(ship.kind())
                    } else {
                        ShotOutcome::Hit
                    });
                }
            }
        }
        // occupancy said ship, ship list disagreed
        Err(GameError::CorruptBoard)
    }

    /// Read-only view of one cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<CellView, GameError> {
        Ok(CellView {
            occupied: self.ship_map.get(row, col)?,
            hit: self.shots.get(row, col)?,
            ship: self.ship_at(row, col),
        })
    }

    /// Every shot taken against this board, hits and misses alike.
    pub fn shots(&self) -> BoardMask {
        self.shots
    }

    /// Union of all ship footprints.
    pub fn ship_map(&self) -> BoardMask {
        self.ship_map
    }

    /// The fleet slots in roster order.
    pub fn ships(&self) -> &[Option<BoardShip>; NUM_SHIPS] {
        &self.ships
    }

    /// Per-ship placement flags in roster order.
    pub fn placed(&self) -> [bool; NUM_SHIPS] {
        core::array::from_fn(|i| self.ships[i].is_some())
    }

    /// True when the whole fleet is down.
    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(|slot| slot.is_some())
    }

    /// Ships not yet sunk. Decreases by exactly one each time a ship's last
    /// segment is hit.
    pub fn ships_remaining(&self) -> usize {
        NUM_SHIPS
            - self
                .ships
                .iter()
                .flatten()
                .filter(|ship| ship.is_sunk())
                .count()
    }

    /// True when every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.all_placed() && self.ships.iter().flatten().all(|ship| ship.is_sunk())
    }

    /// Length of the shortest ship still afloat; `None` when nothing is.
    pub fn smallest_afloat(&self) -> Option<usize> {
        self.ships
            .iter()
            .flatten()
            .filter(|ship| !ship.is_sunk())
            .map(|ship| ship.kind().length())
            .min()
    }

    /// Structural sanity check used when restoring snapshots: the occupancy
    /// union must equal the ship footprints and hits must lie under shots.
    pub fn is_consistent(&self) -> bool {
        let mut union = BoardMask::new();
        for ship in self.ships.iter().flatten() {
            if !(union & ship.mask()).is_empty() {
                return false;
            }
            union |= ship.mask();
            if !((ship.hits() & !self.shots).is_empty()) {
                return false;
            }
            if !((ship.hits() & !ship.mask()).is_empty()) {
                return false;
            }
        }
        union == self.ship_map
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  shots: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.shots, self.ships
        )
    }
}
