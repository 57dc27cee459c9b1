use proptest::prelude::*;

use san_chess::core::square::Square;
use san_chess::game::Game;
use san_chess::pieces::{Piece, PieceKind, Player};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

#[test]
fn knight_in_the_corner_has_two_naive_moves() {
    let knight = Piece::new(PieceKind::Knight, Player::White, sq(0, 0));
    let expected = [sq(1, 2), sq(2, 1)];
    assert_eq!(knight.naive_moves.len(), 2);
    for e in expected {
        assert!(knight.naive_moves.contains(&e));
    }
}

#[test]
fn centered_knight_on_empty_board_has_eight_actual_moves() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::Knight, Player::White, sq(4, 4));
    let knight = game.piece_at(sq(4, 4)).unwrap();
    assert_eq!(knight.actual_moves.len(), 8);
}

#[test]
fn unmoved_pawn_sees_single_and_double_step() {
    for file in 0..8 {
        let mut game = Game::empty();
        game.place_piece(PieceKind::Pawn, Player::White, sq(file, 1));
        let pawn = game.piece_at(sq(file, 1)).unwrap();

        let expected: Vec<Square> = vec![sq(file, 2), sq(file, 3)];
        assert_eq!(pawn.naive_moves.len(), 2);
        assert_eq!(pawn.actual_moves.len(), 2);
        for e in expected {
            assert!(pawn.naive_moves.contains(&e));
            assert!(pawn.actual_moves.contains(&e));
        }
    }
}

#[test]
fn moved_pawn_loses_the_double_step() {
    let mut pawn = Piece::new(PieceKind::Pawn, Player::White, sq(4, 1));
    pawn.move_to(sq(4, 2));
    assert_eq!(pawn.naive_moves.len(), 1);
    assert!(pawn.naive_moves.contains(&sq(4, 3)));
}

#[test]
fn black_pawn_moves_down_the_board() {
    let pawn = Piece::new(PieceKind::Pawn, Player::Black, sq(3, 6));
    assert!(pawn.naive_moves.contains(&sq(3, 5)));
    assert!(pawn.naive_moves.contains(&sq(3, 4)));
    assert!(pawn.naive_captures.contains(&sq(2, 5)));
    assert!(pawn.naive_captures.contains(&sq(4, 5)));
}

#[test]
fn pawn_double_step_needs_both_squares_free() {
    // A blocker on the skipped square kills the double step too.
    let mut game = Game::empty();
    game.place_piece(PieceKind::Pawn, Player::White, sq(4, 1));
    game.place_piece(PieceKind::Pawn, Player::Black, sq(4, 2));
    let pawn = game.piece_at(sq(4, 1)).unwrap();
    assert!(pawn.actual_moves.is_empty());

    let mut game = Game::empty();
    game.place_piece(PieceKind::Pawn, Player::White, sq(4, 1));
    game.place_piece(PieceKind::Pawn, Player::Black, sq(4, 3));
    let pawn = game.piece_at(sq(4, 1)).unwrap();
    assert_eq!(pawn.actual_moves.len(), 1);
    assert!(pawn.actual_moves.contains(&sq(4, 2)));
}

#[test]
fn pawn_captures_only_enemy_occupied_diagonals() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::Pawn, Player::White, sq(4, 3));
    game.place_piece(PieceKind::Rook, Player::Black, sq(3, 4));
    game.place_piece(PieceKind::Rook, Player::White, sq(5, 4));
    let pawn = game.piece_at(sq(4, 3)).unwrap();
    assert_eq!(pawn.actual_captures.len(), 1);
    assert!(pawn.actual_captures.contains(&sq(3, 4)));
}

#[test]
fn rook_ray_truncates_at_first_enemy_and_includes_it() {
    // Slide an enemy pawn down the rook's north ray; the cache must stop at
    // (and include) the blocker, excluding everything beyond it.
    for blocker_rank in 1..8u8 {
        let mut game = Game::empty();
        game.place_piece(PieceKind::Rook, Player::White, sq(0, 0));
        game.place_piece(PieceKind::Pawn, Player::Black, sq(0, blocker_rank));
        let rook = game.piece_at(sq(0, 0)).unwrap();

        for rank in 1..8u8 {
            let reachable = rook.actual_moves.contains(&sq(0, rank));
            assert_eq!(reachable, rank <= blocker_rank, "blocker {blocker_rank}, rank {rank}");
        }
        assert!(rook.actual_captures.contains(&sq(0, blocker_rank)));
    }
}

#[test]
fn rook_ray_excludes_friendly_blocker() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::Rook, Player::White, sq(0, 0));
    game.place_piece(PieceKind::Pawn, Player::White, sq(0, 3));
    let rook = game.piece_at(sq(0, 0)).unwrap();
    assert!(rook.actual_moves.contains(&sq(0, 2)));
    assert!(!rook.actual_moves.contains(&sq(0, 3)));
    assert!(!rook.actual_moves.contains(&sq(0, 4)));
    assert!(rook.actual_captures.is_empty());
}

#[test]
fn king_reaches_one_square_in_every_direction() {
    let mut game = Game::empty();
    game.place_piece(PieceKind::King, Player::White, sq(4, 4));
    let king = game.piece_at(sq(4, 4)).unwrap();
    assert_eq!(king.naive_moves.len(), 8);
    assert_eq!(king.actual_moves.len(), 8);
}

#[test]
fn queen_combines_rook_and_bishop_geometry() {
    let queen = Piece::new(PieceKind::Queen, Player::Black, sq(3, 3));
    let rook = Piece::new(PieceKind::Rook, Player::Black, sq(3, 3));
    let bishop = Piece::new(PieceKind::Bishop, Player::Black, sq(3, 3));
    assert_eq!(
        queen.naive_moves.len(),
        rook.naive_moves.len() + bishop.naive_moves.len()
    );
    for sq in rook.naive_moves.iter().chain(&bishop.naive_moves) {
        assert!(queen.naive_moves.contains(sq));
    }
}

fn arbitrary_kind() -> impl Strategy<Value = PieceKind> {
    prop_oneof![
        Just(PieceKind::Pawn),
        Just(PieceKind::Rook),
        Just(PieceKind::Knight),
        Just(PieceKind::Bishop),
        Just(PieceKind::Queen),
        Just(PieceKind::King),
    ]
}

fn arbitrary_placement() -> impl Strategy<Value = (PieceKind, bool, u8, u8)> {
    (arbitrary_kind(), any::<bool>(), 0..8u8, 0..8u8)
}

proptest! {
    // The actual caches never escape their naive supersets, whatever the
    // occupancy looks like.
    #[test]
    fn actual_caches_are_subsets_of_naive(placements in prop::collection::vec(arbitrary_placement(), 1..16)) {
        let mut game = Game::empty();
        for (kind, white, file, rank) in placements {
            let player = if white { Player::White } else { Player::Black };
            game.place_piece(kind, player, Square::new(file, rank));
        }
        for piece in game.pieces() {
            prop_assert!(piece.actual_moves.is_subset(&piece.naive_moves));
            prop_assert!(piece.actual_captures.is_subset(&piece.naive_captures));
        }
    }
}
