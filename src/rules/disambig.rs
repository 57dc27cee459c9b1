use crate::core::square::Square;
use crate::error::ChessError;

/// Narrow a candidate-origin set to exactly one square using the notation's
/// origin hints.
///
/// `candidates` are the squares of matching-kind pieces that can already
/// reach the destination. Zero survivors means the move is not legal; more
/// than one means the notation under-specifies the origin, and the engine
/// never resolves that by guessing.
pub fn resolve(
    candidates: &[Square],
    hint_file: Option<u8>,
    hint_rank: Option<u8>,
    token: &str,
) -> Result<Square, ChessError> {
    if let (Some(file), Some(rank)) = (hint_file, hint_rank) {
        // Two fixed coordinates can match at most one candidate.
        let exact = Square::new(file, rank);
        return candidates
            .iter()
            .copied()
            .find(|&sq| sq == exact)
            .ok_or_else(|| ChessError::not_legal(token));
    }

    let mut survivors = candidates.iter().copied().filter(|sq| {
        hint_file.is_none_or(|f| sq.file() == f) && hint_rank.is_none_or(|r| sq.rank() == r)
    });

    match (survivors.next(), survivors.next()) {
        (None, _) => Err(ChessError::not_legal(token)),
        (Some(sq), None) => Ok(sq),
        (Some(_), Some(_)) => Err(ChessError::ambiguous(token)),
    }
}
