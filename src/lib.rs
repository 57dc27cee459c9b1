//! A chess rules engine driven by standard algebraic notation.
//!
//! Feed half-moves (`"e4"`, `"Nbd2"`, `"exd5"`, `"O-O"`, ...) into a
//! [`game::Game`] one at a time; the engine resolves which piece the token
//! describes, rejects illegal or ambiguous moves without touching state, and
//! tracks turn, castling rights, en passant and check/checkmate/stalemate.

pub mod core;
pub mod error;
pub mod game;
pub mod notation;
pub mod pieces;
pub mod rules;
