use broadside::{
    Board, GameError, Orientation, ShipKind, ShotOutcome, NUM_SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_validity_query_is_pure() {
    let board = Board::new();
    assert!(board.is_position_valid(5, 0, 0, Orientation::Horizontal));
    assert!(board.is_position_valid(5, 0, 5, Orientation::Horizontal));
    assert!(!board.is_position_valid(5, 0, 6, Orientation::Horizontal));
    assert!(!board.is_position_valid(2, 9, 0, Orientation::Vertical));
    // querying changed nothing
    assert!(board.ship_map().is_empty());
}

#[test]
fn test_place_marks_exactly_the_footprint() {
    let mut board = Board::new();
    board.place(2, 3, 3, Orientation::Vertical).unwrap();

    assert_eq!(board.ship_map().count(), ShipKind::Cruiser.length());
    for r in 3..6 {
        let cell = board.cell(r, 3).unwrap();
        assert!(cell.occupied);
        assert_eq!(cell.ship, Some(2));
    }
    assert!(!board.cell(6, 3).unwrap().occupied);
    assert!(!board.cell(3, 4).unwrap().occupied);
}

#[test]
fn test_overlap_and_double_placement_rejected() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();

    assert!(!board.is_position_valid(4, 0, 4, Orientation::Horizontal));
    assert_eq!(
        board.place(1, 0, 4, Orientation::Horizontal).unwrap_err(),
        GameError::Overlap
    );
    assert_eq!(
        board.place(0, 5, 5, Orientation::Horizontal).unwrap_err(),
        GameError::ShipAlreadyPlaced
    );
    assert_eq!(
        board.place(9, 5, 5, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidIndex
    );
}

#[test]
fn test_remove_and_replace() {
    let mut board = Board::new();
    board.place(1, 2, 2, Orientation::Horizontal).unwrap();
    board.place(4, 5, 5, Orientation::Vertical).unwrap();

    assert_eq!(board.ship_at(2, 3), Some(1));
    board.remove(1).unwrap();
    assert_eq!(board.ship_at(2, 3), None);
    // the other ship is untouched
    assert_eq!(board.ship_at(5, 5), Some(4));
    assert_eq!(board.ship_map().count(), ShipKind::Destroyer.length());

    assert_eq!(board.remove(1).unwrap_err(), GameError::NoShipThere);
    // freed cells accept the ship again
    assert!(board.is_position_valid(4, 2, 2, Orientation::Horizontal));
    board.place(1, 2, 2, Orientation::Horizontal).unwrap();
}

#[test]
fn test_shot_resolution_walkthrough() {
    // size-2 destroyer at (0,0)-(0,1)
    let mut board = Board::new();
    assert!(board.is_position_valid(2, 0, 0, Orientation::Horizontal));
    board.place(4, 0, 0, Orientation::Horizontal).unwrap();
    assert!(!board.is_position_valid(2, 0, 0, Orientation::Horizontal));

    assert_eq!(board.apply_shot(0, 0).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.ships()[4].unwrap().hit_count(), 1);

    assert_eq!(
        board.apply_shot(0, 1).unwrap(),
        ShotOutcome::Sunk(ShipKind::Destroyer)
    );
    assert_eq!(board.ships_remaining(), NUM_SHIPS - 1);

    // repeated shot is flagged and changes nothing
    assert_eq!(board.apply_shot(0, 0).unwrap(), ShotOutcome::Duplicate);
    assert_eq!(board.ships()[4].unwrap().hit_count(), 2);
    assert_eq!(board.ships_remaining(), NUM_SHIPS - 1);
}

#[test]
fn test_miss_marks_cell() {
    let mut board = Board::new();
    assert_eq!(board.apply_shot(9, 9).unwrap(), ShotOutcome::Miss);
    let cell = board.cell(9, 9).unwrap();
    assert!(cell.hit);
    assert!(!cell.occupied);
    assert_eq!(board.apply_shot(9, 9).unwrap(), ShotOutcome::Duplicate);
}

#[test]
fn test_sink_whole_fleet() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_random_fleet(&mut rng).unwrap();

    let mut sunk = 0;
    for (r, c) in board.ship_map().cells().collect::<Vec<_>>() {
        match board.apply_shot(r, c).unwrap() {
            ShotOutcome::Sunk(_) => sunk += 1,
            ShotOutcome::Hit => {}
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    assert_eq!(sunk, NUM_SHIPS);
    assert_eq!(board.ships_remaining(), 0);
    assert!(board.all_sunk());
}

#[test]
fn test_random_fleet_covers_seventeen_cells() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut board = Board::new();
        board.place_random_fleet(&mut rng).unwrap();
        assert!(board.all_placed());
        assert_eq!(board.ship_map().count(), TOTAL_SHIP_CELLS);
        assert!(board.is_consistent());
    }
}

#[test]
fn test_random_placement_fallback_on_cramped_board() {
    // occupy everything except one horizontal strip of two cells
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.place(1, 1, 0, Orientation::Horizontal).unwrap();
    board.place(2, 2, 0, Orientation::Horizontal).unwrap();
    board.place(3, 3, 0, Orientation::Horizontal).unwrap();

    let mut rng = SmallRng::seed_from_u64(1);
    // the scan fallback must find a spot even if sampling is unlucky
    let (r, c, o) = board.random_placement(&mut rng, 4).unwrap();
    assert!(board.is_position_valid(2, r, c, o));
}

#[test]
fn test_reset_clears_everything() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.apply_shot(0, 0).unwrap();
    board.apply_shot(9, 9).unwrap();

    board.reset();
    assert!(board.ship_map().is_empty());
    assert!(board.shots().is_empty());
    assert_eq!(board.placed(), [false; NUM_SHIPS]);
    assert_eq!(board.ships_remaining(), NUM_SHIPS);
}

#[test]
fn test_smallest_afloat_tracks_sinkings() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap(); // carrier, 5
    board.place(4, 2, 0, Orientation::Horizontal).unwrap(); // destroyer, 2

    assert_eq!(board.smallest_afloat(), Some(2));
    board.apply_shot(2, 0).unwrap();
    board.apply_shot(2, 1).unwrap();
    assert_eq!(board.smallest_afloat(), Some(5));
}
