//! Computer targeting: the search / target / destroy hunt.
//!
//! The hunter is an explicit state value (no hidden statics) so several
//! instances can run side by side, decisions replay deterministically under
//! a seeded RNG, and an in-progress hunt survives a session snapshot.
//!
//! Three escape hatches keep every decision bounded on adversarial boards:
//! the 100-attempt sampling fallback in search, the single direction
//! reversal before reverting to target, and the contiguous-segment cutoff.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::ShotOutcome;
use crate::config::BOARD_SIZE;

/// Search gives up rejection sampling after this many draws and picks any
/// unshot cell uniformly instead.
const SEARCH_ATTEMPTS: usize = 100;

/// No single hunt can string together more contiguous hits than the longest
/// ship; beyond this the hunter is confused by adjacent ships and restarts.
pub const HUNT_SEGMENT_LIMIT: usize = 5;

/// High-level hunt state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum HuntPhase {
    /// No live target; sample the open ocean.
    Search,
    /// One hit, orientation unknown; probe the cardinal neighbors.
    Target,
    /// Orientation known; walk the line until the ship is gone.
    Destroy,
}

/// Cardinal step directions on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }

    /// One step from (`row`, `col`), `None` when it leaves the grid.
    pub fn step(self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self {
            Heading::North => row.checked_sub(1).map(|r| (r, col)),
            Heading::West => col.checked_sub(1).map(|c| (row, c)),
            Heading::South => (row + 1 < BOARD_SIZE).then(|| (row + 1, col)),
            Heading::East => (col + 1 < BOARD_SIZE).then(|| (row, col + 1)),
        }
    }

    /// Heading leading from `from` to the adjacent cell `to`.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Heading> {
        Heading::ALL
            .into_iter()
            .find(|h| h.step(from.0, from.1) == Some(to))
    }
}

/// Targeting state machine for one computer player.
///
/// All working memory is explicit so the whole hunt serializes with the
/// session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Hunter {
    phase: HuntPhase,
    /// Cell where the current hunt opened.
    first_hit: (usize, usize),
    /// Most recent successful hit.
    last_hit: (usize, usize),
    /// Walk direction while destroying.
    heading: Heading,
    /// Shuffled probe order around `first_hit`.
    probes: [Heading; 4],
    probe_cursor: usize,
    /// One end of the line already explored.
    reversed: bool,
    /// Contiguous hits in the current hunt.
    segments: usize,
}

impl Hunter {
    pub fn new() -> Self {
        Hunter {
            phase: HuntPhase::Search,
            first_hit: (0, 0),
            last_hit: (0, 0),
            heading: Heading::North,
            probes: Heading::ALL,
            probe_cursor: 0,
            reversed: false,
            segments: 0,
        }
    }

    /// Current high-level phase.
    pub fn phase(&self) -> HuntPhase {
        self.phase
    }

    /// Drop all working memory and go back to searching.
    fn rewind(&mut self) {
        *self = Hunter::new();
    }

    /// Pick the next cell to fire at on `enemy`.
    ///
    /// Never returns an already-shot cell; `None` only when every cell has
    /// been shot (a finished game). Completes in bounded time on any board.
    pub fn choose<R: Rng>(&mut self, rng: &mut R, enemy: &Board) -> Option<(usize, usize)> {
        loop {
            match self.phase {
                HuntPhase::Search => return self.search(rng, enemy),
                HuntPhase::Target => {
                    if let Some(cell) = self.next_probe(enemy) {
                        return Some(cell);
                    }
                    // all four neighbors exhausted; the hit must have been a
                    // ship that sank elsewhere or an isolated segment
                    trace!("probes around {:?} exhausted, back to search", self.first_hit);
                    self.rewind();
                }
                HuntPhase::Destroy => {
                    if let Some(cell) = self.along_line(enemy) {
                        return Some(cell);
                    }
                    // both ends blocked; only the perpendicular neighbors of
                    // the opening hit can still hold the rest of the ship
                    trace!("line through {:?} blocked both ways", self.first_hit);
                    self.phase = HuntPhase::Target;
                    self.probes.shuffle(rng);
                    self.probe_cursor = 0;
                }
            }
        }
    }

    /// Digest the outcome of the shot at `cell` chosen by [`Hunter::choose`].
    pub fn observe<R: Rng>(&mut self, rng: &mut R, cell: (usize, usize), outcome: ShotOutcome) {
        match outcome {
            // a kill closes the hunt no matter which phase fired the shot
            ShotOutcome::Sunk(kind) => {
                trace!("{} down, hunt closed", kind.name());
                self.rewind();
            }
            ShotOutcome::Hit => {
                match self.phase {
                    HuntPhase::Search => {
                        trace!("hunt opened at {:?}", cell);
                        self.phase = HuntPhase::Target;
                        self.first_hit = cell;
                        self.last_hit = cell;
                        self.probes.shuffle(rng);
                        self.probe_cursor = 0;
                        self.reversed = false;
                        self.segments = 1;
                    }
                    HuntPhase::Target => {
                        if let Some(heading) = Heading::between(self.first_hit, cell) {
                            self.heading = heading;
                        }
                        trace!("line found, destroying {:?}wards", self.heading);
                        self.phase = HuntPhase::Destroy;
                        self.last_hit = cell;
                        self.reversed = false;
                        self.segments += 1;
                    }
                    HuntPhase::Destroy => {
                        self.last_hit = cell;
                        self.segments += 1;
                    }
                }
                if self.segments > HUNT_SEGMENT_LIMIT {
                    // more contiguous hits than the longest ship: adjacent
                    // ships are confusing the walk
                    trace!("segment limit reached, hunt abandoned");
                    self.rewind();
                }
            }
            ShotOutcome::Miss => match self.phase {
                HuntPhase::Search => {}
                HuntPhase::Target => {
                    self.probe_cursor += 1;
                }
                HuntPhase::Destroy => {
                    if !self.reversed {
                        self.flip();
                    } else {
                        self.phase = HuntPhase::Target;
                        self.probes.shuffle(rng);
                        self.probe_cursor = 0;
                    }
                }
            },
            ShotOutcome::Duplicate => {}
        }
    }

    /// Turn around and continue from the opening hit.
    fn flip(&mut self) {
        self.reversed = true;
        self.heading = self.heading.opposite();
        self.last_hit = self.first_hit;
    }

    fn search<R: Rng>(&self, rng: &mut R, enemy: &Board) -> Option<(usize, usize)> {
        let shots = enemy.shots();
        let open = !shots;
        if open.is_empty() {
            return None;
        }
        // smallest ship still afloat bounds how tight a viable gap can be
        let floor = enemy.smallest_afloat().unwrap_or(0);

        for _ in 0..SEARCH_ATTEMPTS {
            let row = rng.random_range(0..BOARD_SIZE);
            let col = rng.random_range(0..BOARD_SIZE);
            if shots.get(row, col).unwrap_or(true) {
                continue;
            }
            if self.cramped(enemy, row, col, floor) {
                continue;
            }
            return Some((row, col));
        }

        // gap heuristic starved us out; any unshot cell, uniformly
        let pick = rng.random_range(0..open.count());
        open.cells().nth(pick)
    }

    /// Minimum-gap heuristic: a cell bordering a hit on a ship shorter than
    /// the smallest live ship is unlikely to hold an intact one.
    fn cramped(&self, enemy: &Board, row: usize, col: usize, floor: usize) -> bool {
        let struck = enemy.shots() & enemy.ship_map();
        for heading in Heading::ALL {
            let Some((r, c)) = heading.step(row, col) else {
                continue;
            };
            if !struck.get(r, c).unwrap_or(false) {
                continue;
            }
            if let Some(index) = enemy.ship_at(r, c) {
                if let Some(ship) = enemy.ships()[index] {
                    if ship.kind().length() < floor {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Next untried probe around the opening hit, skipping cells that are
    /// off the grid or already shot.
    fn next_probe(&mut self, enemy: &Board) -> Option<(usize, usize)> {
        while self.probe_cursor < self.probes.len() {
            let heading = self.probes[self.probe_cursor];
            if let Some((r, c)) = heading.step(self.first_hit.0, self.first_hit.1) {
                if !enemy.shots().get(r, c).unwrap_or(true) {
                    return Some((r, c));
                }
            }
            self.probe_cursor += 1;
        }
        None
    }

    /// One step beyond the latest hit; flips once when the line runs out.
    fn along_line(&mut self, enemy: &Board) -> Option<(usize, usize)> {
        if let Some((r, c)) = self.heading.step(self.last_hit.0, self.last_hit.1) {
            if !enemy.shots().get(r, c).unwrap_or(true) {
                return Some((r, c));
            }
        }
        if !self.reversed {
            self.flip();
            if let Some((r, c)) = self.heading.step(self.last_hit.0, self.last_hit.1) {
                if !enemy.shots().get(r, c).unwrap_or(true) {
                    return Some((r, c));
                }
            }
        }
        None
    }
}

impl Default for Hunter {
    fn default() -> Self {
        Self::new()
    }
}
