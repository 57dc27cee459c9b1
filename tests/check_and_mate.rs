use san_chess::core::square::Square;
use san_chess::error::ChessError;
use san_chess::game::{Game, GameStatus};
use san_chess::pieces::{PieceKind, Player};
use san_chess::rules::attacks::{is_attacked, is_check};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

#[test]
fn nothing_is_attacked_on_an_empty_board() {
    let game = Game::empty();
    for target in Square::all() {
        assert!(!is_attacked(target, Player::White, game.pieces()));
        assert!(!is_attacked(target, Player::Black, game.pieces()));
        assert!(!is_check(target, Player::White, game.pieces()));
    }
}

#[test]
fn pawns_threaten_diagonals_but_never_straight_ahead() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::Pawn, Player::White, sq(4, 3));
    assert!(is_attacked(sq(3, 4), Player::White, game.pieces()));
    assert!(is_attacked(sq(5, 4), Player::White, game.pieces()));
    assert!(!is_attacked(sq(4, 4), Player::White, game.pieces()));
}

#[test]
fn sliders_do_not_attack_through_blockers() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::Rook, Player::White, sq(0, 0));
    game.place_piece(PieceKind::Pawn, Player::Black, sq(0, 3));
    assert!(is_attacked(sq(0, 2), Player::White, game.pieces()));
    assert!(is_attacked(sq(0, 3), Player::White, game.pieces()));
    assert!(!is_attacked(sq(0, 4), Player::White, game.pieces()));
}

#[test]
fn giving_check_sets_the_status() {
    let mut game = Game::new();
    for token in ["e4", "d5", "Bb5+"] {
        game.apply_san(token).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Check);
    assert!(game.in_check());
    assert_eq!(game.turn(), Player::Black);
}

#[test]
fn moves_ignoring_check_are_rejected() {
    let mut game = Game::new();
    for token in ["e4", "d5", "Bb5+"] {
        game.apply_san(token).unwrap();
    }
    // Attacks the bishop but leaves the king in check.
    assert!(matches!(
        game.apply_san("a6"),
        Err(ChessError::MoveNotLegal { .. })
    ));
    // Blocking the diagonal is fine.
    game.apply_san("c6").unwrap();
    assert_eq!(game.status(), GameStatus::AwaitingMove);
}

#[test]
fn moving_a_pinned_piece_is_rejected() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::King, Player::White, sq(4, 0));
    game.place_piece(PieceKind::Rook, Player::White, sq(4, 1));
    game.place_piece(PieceKind::Rook, Player::Black, sq(4, 7));
    game.place_piece(PieceKind::King, Player::Black, sq(0, 7));

    assert!(matches!(
        game.apply_san("Ra2"),
        Err(ChessError::MoveNotLegal { .. })
    ));
    // Along the pin is fine.
    game.apply_san("Re4").unwrap();
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = Game::new();
    for token in ["f3", "e5", "g4", "Qh4#"] {
        game.apply_san(token).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.in_check());

    // Terminal: nothing further applies.
    assert!(matches!(
        game.apply_san("a3"),
        Err(ChessError::MoveNotLegal { .. })
    ));
}

#[test]
fn scholars_mate_from_movetext() {
    let game =
        Game::from_movetext("1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0").unwrap();
    assert_eq!(game.status(), GameStatus::Checkmate);
}

#[test]
fn cornered_king_with_no_move_is_stalemate() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::King, Player::Black, sq(0, 7));
    game.place_piece(PieceKind::Queen, Player::White, sq(6, 5));
    game.place_piece(PieceKind::King, Player::White, sq(4, 0));

    // Qg6-b6 boxes in the a8 king without checking it.
    game.apply_san("Qb6").unwrap();
    assert_eq!(game.status(), GameStatus::Stalemate);
    assert!(!game.in_check());
}

#[test]
fn escapable_check_is_not_mate() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::King, Player::Black, sq(4, 7));
    game.place_piece(PieceKind::Rook, Player::White, sq(0, 3));
    game.place_piece(PieceKind::King, Player::White, sq(0, 0));
    game.set_turn(Player::White);

    game.apply_san("Re4+").unwrap();
    assert_eq!(game.status(), GameStatus::Check);
    game.apply_san("Kd7").unwrap();
    assert_eq!(game.status(), GameStatus::AwaitingMove);
}
