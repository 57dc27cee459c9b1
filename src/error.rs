use thiserror::Error;

/// Recoverable failures when evaluating one half-move token.
///
/// Validation always precedes mutation, so a returned error never leaves the
/// game in a corrupted state.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ChessError {
    /// The token does not match the half-move grammar.
    #[error("cannot parse notation {token:?}")]
    NotationParse { token: String },

    /// The grammar matched, but no piece of the named kind and the side to
    /// move can legally reach the destination.
    #[error("move {token:?} is not legal")]
    MoveNotLegal { token: String },

    /// More than one candidate origin survives the given hints; the engine
    /// never guesses.
    #[error("move {token:?} is ambiguous")]
    MoveAmbiguous { token: String },
}

impl ChessError {
    pub(crate) fn not_legal(token: &str) -> Self {
        ChessError::MoveNotLegal { token: token.to_string() }
    }

    pub(crate) fn ambiguous(token: &str) -> Self {
        ChessError::MoveAmbiguous { token: token.to_string() }
    }

    pub(crate) fn parse(token: &str) -> Self {
        ChessError::NotationParse { token: token.to_string() }
    }
}
