//! Ship identities and placed-ship state.

use core::fmt;
use num_traits::{PrimInt, Unsigned};

use crate::common::GameError;
use crate::mask::Mask;

/// Placement axis of a ship. Horizontal ships extend along columns,
/// vertical ships along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Ship identity. Identity and length are deliberately decoupled: the kind
/// names the ship, [`ShipKind::length`] looks up its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }
}

/// A ship placed on an `N×N` board.
///
/// The footprint is precomputed as a [`Mask`]; hits against the ship are a
/// second mask, so `hit_count` can never exceed the footprint size.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship<T, const N: usize>
where
    T: PrimInt + Unsigned,
{
    kind: ShipKind,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: Mask<T, N>,
    hits: Mask<T, N>,
}

impl<T, const N: usize> Ship<T, N>
where
    T: PrimInt + Unsigned,
{
    /// Construct a ship at (`row`, `col`) extending along `orientation`.
    /// Fails with [`GameError::OutOfBounds`] when the footprint leaves the
    /// grid; overlap with other ships is the board's concern.
    pub fn new(
        kind: ShipKind,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, GameError> {
        let len = kind.length();
        let fits = match orientation {
            Orientation::Horizontal => col + len <= N && row < N,
            Orientation::Vertical => row + len <= N && col < N,
        };
        if !fits {
            return Err(GameError::OutOfBounds);
        }

        let mut mask = Mask::new();
        for k in 0..len {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + k),
                Orientation::Vertical => (row + k, col),
            };
            mask.set(r, c)?;
        }

        Ok(Ship {
            kind,
            orientation,
            row,
            col,
            mask,
            hits: Mask::new(),
        })
    }

    /// True when (`row`, `col`) is part of the footprint.
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Register a shot against the ship. Returns `true` when the cell is
    /// part of the footprint and records the hit.
    pub fn take_hit(&mut self, row: usize, col: usize) -> bool {
        if self.covers(row, col) {
            let _ = self.hits.set(row, col);
            true
        } else {
            false
        }
    }

    /// Number of distinct cells hit so far.
    pub fn hit_count(&self) -> usize {
        self.hits.count()
    }

    /// All cells hit. Sunk is terminal: hits are never cleared.
    pub fn is_sunk(&self) -> bool {
        self.hit_count() == self.kind.length()
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Origin cell (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Footprint mask on the board.
    pub fn mask(&self) -> Mask<T, N> {
        self.mask
    }

    /// Hit mask; always a subset of the footprint.
    pub fn hits(&self) -> Mask<T, N> {
        self.hits
    }
}

impl<T, const N: usize> fmt::Debug for Ship<T, N>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ {} at ({}, {}) {:?}, {}/{} hit }}",
            self.kind.name(),
            self.row,
            self.col,
            self.orientation,
            self.hit_count(),
            self.kind.length(),
        )
    }
}
