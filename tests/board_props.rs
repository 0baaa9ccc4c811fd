use broadside::{Board, Orientation, ShotOutcome, BOARD_SIZE, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn random_fleet(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_random_fleet(&mut rng).unwrap();
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Random fleets never overlap and always cover exactly 17 cells.
    #[test]
    fn random_fleet_is_disjoint(seed in any::<u64>()) {
        let board = random_fleet(seed);
        prop_assert_eq!(board.ship_map().count(), TOTAL_SHIP_CELLS);
        prop_assert!(board.is_consistent());
    }

    /// Any candidate whose footprint touches an occupied cell is invalid.
    #[test]
    fn occupied_cells_invalidate_candidates(
        seed in any::<u64>(),
        index in 0..NUM_SHIPS,
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE,
        vertical in any::<bool>(),
    ) {
        let board = random_fleet(seed);
        let len = FLEET[index].length();
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };

        let footprint: Vec<_> = (0..len)
            .map(|k| match orientation {
                Orientation::Horizontal => (row, col + k),
                Orientation::Vertical => (row + k, col),
            })
            .collect();
        let touches_ship = footprint.iter().any(|&(r, c)| {
            r < BOARD_SIZE && c < BOARD_SIZE && board.cell(r, c).unwrap().occupied
        });
        let off_grid = footprint.iter().any(|&(r, c)| r >= BOARD_SIZE || c >= BOARD_SIZE);

        if touches_ship || off_grid {
            prop_assert!(!board.is_position_valid(len, row, col, orientation));
        } else {
            prop_assert!(board.is_position_valid(len, row, col, orientation));
        }
    }

    /// Shooting the same cell twice reports Duplicate and changes nothing.
    #[test]
    fn repeated_shots_are_inert(
        seed in any::<u64>(),
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE,
    ) {
        let mut board = random_fleet(seed);
        let first = board.apply_shot(row, col).unwrap();
        prop_assert_ne!(first, ShotOutcome::Duplicate);

        let remaining = board.ships_remaining();
        let hits: usize = board.ships().iter().flatten().map(|s| s.hit_count()).sum();

        prop_assert_eq!(board.apply_shot(row, col).unwrap(), ShotOutcome::Duplicate);
        prop_assert_eq!(board.ships_remaining(), remaining);
        let hits_after: usize = board.ships().iter().flatten().map(|s| s.hit_count()).sum();
        prop_assert_eq!(hits_after, hits);
    }

    /// Sinking the whole fleet decrements the tally exactly five times.
    #[test]
    fn fleet_sinks_exactly_once_each(seed in any::<u64>()) {
        let mut board = random_fleet(seed);
        let mut sunk = 0;
        let mut remaining = NUM_SHIPS;
        for (r, c) in board.ship_map().cells().collect::<Vec<_>>() {
            if let ShotOutcome::Sunk(_) = board.apply_shot(r, c).unwrap() {
                sunk += 1;
                prop_assert_eq!(board.ships_remaining(), remaining - 1);
                remaining -= 1;
            } else {
                prop_assert_eq!(board.ships_remaining(), remaining);
            }
        }
        prop_assert_eq!(sunk, NUM_SHIPS);
        prop_assert_eq!(board.ships_remaining(), 0);
    }
}
