use crate::core::square::Square;
use crate::pieces::{Piece, PieceKind, Player};

/// True iff some piece of `by` attacks `square`.
///
/// Sliders answer from their blocking-aware actual caches. Knights and kings
/// answer from naive reachability, since they are never blocked en route.
/// Pawns answer from capture geometry only: a pawn never threatens the
/// square directly ahead of it, but covers its forward diagonals whether or
/// not they are occupied.
pub fn is_attacked(square: Square, by: Player, pieces: &[Piece]) -> bool {
    pieces.iter().filter(|p| p.player == by).any(|p| match p.kind {
        PieceKind::Pawn => p.naive_captures.contains(&square),
        PieceKind::Knight | PieceKind::King => p.naive_moves.contains(&square),
        _ => p.actual_moves.contains(&square) || p.actual_captures.contains(&square),
    })
}

/// Is the king standing on `king_square` in check?
pub fn is_check(king_square: Square, king_owner: Player, pieces: &[Piece]) -> bool {
    is_attacked(king_square, king_owner.other(), pieces)
}
