use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center of 15x15
    assert_eq!(pos.to_index(15), 7 * 15 + 7);
    assert_eq!(pos.to_index(15), 112);

    let pos2 = Pos::from_index(112, 15);
    assert_eq!(pos2, pos);
}

#[test]
fn test_pos_ordering_is_row_major() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_board_bounds() {
    let board = Board::new();
    assert_eq!(board.size(), DEFAULT_BOARD_SIZE);
    assert!(board.in_bounds(0, 0));
    assert!(board.in_bounds(14, 14));
    assert!(!board.in_bounds(-1, 0));
    assert!(!board.in_bounds(0, -1));
    assert!(!board.in_bounds(15, 0));
    assert!(!board.in_bounds(0, 15));
    assert_eq!(board.cell(15, 3), None);
    assert_eq!(board.cell(3, 3), Some(Stone::Empty));
}

#[test]
fn test_board_center() {
    assert_eq!(Board::new().center(), Pos::new(7, 7));
    assert_eq!(Board::with_size(8).unwrap().center(), Pos::new(4, 4));
}

#[test]
fn test_with_size_rejects_unsupported() {
    assert_eq!(Board::with_size(4), Err(BoardError::InvalidSize(4)));
    assert_eq!(Board::with_size(33), Err(BoardError::InvalidSize(33)));
    assert!(Board::with_size(19).is_ok());
}

#[test]
fn test_place_and_get() {
    let mut board = Board::new();
    board.place_stone(Pos::new(3, 4), Stone::Black).unwrap();
    assert_eq!(board.get(Pos::new(3, 4)), Stone::Black);
    assert_eq!(board.stone_count(), 1);
    assert_eq!(board.last_move(), Some(Pos::new(3, 4)));
}

#[test]
fn test_place_occupied_fails_without_mutation() {
    let mut board = Board::new();
    board.place_stone(Pos::new(3, 4), Stone::Black).unwrap();
    let snapshot = board.clone();

    let err = board.place_stone(Pos::new(3, 4), Stone::White).unwrap_err();
    assert_eq!(err, BoardError::Occupied(Pos::new(3, 4)));
    assert_eq!(board, snapshot);
}

#[test]
fn test_place_out_of_bounds_fails() {
    let mut board = Board::new();
    let err = board.place_stone(Pos::new(15, 0), Stone::Black).unwrap_err();
    assert!(matches!(err, BoardError::OutOfBounds { row: 15, col: 0, size: 15 }));
    assert!(board.is_board_empty());
}

#[test]
fn test_place_empty_stone_fails() {
    let mut board = Board::new();
    let err = board.place_stone(Pos::new(1, 1), Stone::Empty).unwrap_err();
    assert_eq!(err, BoardError::EmptyStone(Pos::new(1, 1)));
    assert!(board.history().is_empty());
}

#[test]
fn test_remove_last_stone() {
    let mut board = Board::new();
    let before = board.clone();
    board.place_stone(Pos::new(5, 5), Stone::White).unwrap();
    board.remove_stone(Pos::new(5, 5));
    assert_eq!(board, before);
}

#[test]
#[should_panic(expected = "inconsistent board state")]
fn test_remove_non_last_stone_panics() {
    let mut board = Board::new();
    board.place_stone(Pos::new(5, 5), Stone::White).unwrap();
    board.place_stone(Pos::new(6, 6), Stone::Black).unwrap();
    board.remove_stone(Pos::new(5, 5));
}

#[test]
fn test_scoped_placement_undoes_on_drop() {
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
    let snapshot = board.clone();

    {
        let mut outer = board.place_scoped(Pos::new(7, 8), Stone::White).unwrap();
        assert_eq!(outer.get(Pos::new(7, 8)), Stone::White);
        let inner = outer.place_scoped(Pos::new(7, 9), Stone::Black).unwrap();
        assert_eq!(inner.stone_count(), 3);
        assert_eq!(inner.pos(), Pos::new(7, 9));
    }

    assert_eq!(board, snapshot);
}

#[test]
fn test_scoped_placement_rejects_occupied() {
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
    assert!(board.place_scoped(Pos::new(7, 7), Stone::White).is_err());
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_empty_cells_row_major_and_full() {
    let mut board = Board::with_size(5).unwrap();
    assert_eq!(board.empty_cells().next(), Some(Pos::new(0, 0)));

    let mut color = Stone::Black;
    for r in 0..5 {
        for c in 0..5 {
            board.place_stone(Pos::new(r, c), color).unwrap();
            color = color.opponent();
        }
    }
    assert!(board.is_full());
    assert_eq!(board.empty_cells().count(), 0);
}

#[test]
fn test_display_marks_stones() {
    let mut board = Board::with_size(5).unwrap();
    board.place_stone(Pos::new(0, 0), Stone::Black).unwrap();
    board.place_stone(Pos::new(0, 1), Stone::White).unwrap();
    let text = board.to_string();
    assert!(text.lines().nth(1).unwrap().starts_with(" 0  X O ."));
}
