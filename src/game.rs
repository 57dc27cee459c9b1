use log::{debug, trace};

use crate::core::board::{Board, Direction, Occupant};
use crate::core::square::Square;
use crate::error::ChessError;
use crate::notation::{parse_half_move, tokenize_movetext, HalfMove};
use crate::pieces::{Piece, PieceKind, Player};
use crate::rules::attacks::{is_attacked, is_check};
use crate::rules::disambig::resolve;

/// Derived game state, seen from the side to move.
///
/// `Check` still awaits a move; `Checkmate`, `Stalemate` and `Complete` are
/// terminal. `Complete` marks an imported game record that ended undecided
/// (resignation or abandonment implied by the record).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameStatus {
    AwaitingMove,
    Check,
    Checkmate,
    Stalemate,
    Complete,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Complete)
    }
}

/// Castling availability, four independent flags.
///
/// A flag clears permanently once its king or rook moves, is captured, or
/// castles; it is never restored.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn kingside(&self, player: Player) -> bool {
        match player {
            Player::White => self.white_kingside,
            Player::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, player: Player) -> bool {
        match player {
            Player::White => self.white_queenside,
            Player::Black => self.black_queenside,
        }
    }

    fn clear_kingside(&mut self, player: Player) {
        match player {
            Player::White => self.white_kingside = false,
            Player::Black => self.black_kingside = false,
        }
    }

    fn clear_queenside(&mut self, player: Player) {
        match player {
            Player::White => self.white_queenside = false,
            Player::Black => self.black_queenside = false,
        }
    }

    fn clear_side(&mut self, player: Player) {
        self.clear_kingside(player);
        self.clear_queenside(player);
    }
}

/// The orchestrator: owns the board, both piece sets, turn, castling rights,
/// en-passant target and status. All mutation funnels through move
/// application; trial moves run on a scratch clone of the whole value.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    pieces: Vec<Piece>,
    turn: Player,
    castling: CastlingRights,
    en_passant: Option<Square>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A fresh game: standard layout, White to move.
    pub fn new() -> Self {
        let board = Board::standard();
        let pieces = Square::all()
            .filter_map(|sq| board.get(sq).map(|occ| Piece::new(occ.kind, occ.player, sq)))
            .collect();
        let mut game = Self {
            board,
            pieces,
            turn: Player::White,
            castling: CastlingRights::all(),
            en_passant: None,
            status: GameStatus::AwaitingMove,
        };
        game.refresh_actual_caches();
        game
    }

    /// An empty board, for scenario setup.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            pieces: Vec::new(),
            turn: Player::White,
            castling: CastlingRights::all(),
            en_passant: None,
            status: GameStatus::AwaitingMove,
        }
    }

    /// A game replayed from PGN movetext.
    pub fn from_movetext(text: &str) -> Result<Self, ChessError> {
        let mut game = Self::new();
        game.apply_movetext(text)?;
        Ok(game)
    }

    /// Drop a piece directly onto a square (scenario setup), replacing
    /// whatever stood there.
    pub fn place_piece(&mut self, kind: PieceKind, player: Player, sq: Square) {
        self.remove_piece_at(sq);
        self.board.place(sq, Occupant { kind, player });
        self.pieces.push(Piece::new(kind, player, sq));
        self.refresh_actual_caches();
    }

    /// Scenario setup: hand the move to a side without applying one.
    pub fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    // === Read-only surface ===

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Every piece still on the board, both sides.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == sq)
    }

    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.pieces
            .iter()
            .find(|p| p.player == player && p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    /// Is the side to move in check right now? Derived on demand.
    pub fn in_check(&self) -> bool {
        self.king_square(self.turn)
            .is_some_and(|k| is_check(k, self.turn, &self.pieces))
    }

    // === Move application ===

    /// Parse and apply one half-move for the side to move.
    ///
    /// On any error the game state is untouched.
    pub fn apply_san(&mut self, token: &str) -> Result<(), ChessError> {
        if self.status.is_over() {
            return Err(ChessError::not_legal(token));
        }
        match parse_half_move(token)? {
            HalfMove::CastleKingside { .. } => self.apply_castle(token, true),
            HalfMove::CastleQueenside { .. } => self.apply_castle(token, false),
            HalfMove::Normal {
                kind,
                origin_file,
                origin_rank,
                capture,
                dest,
                promotion,
                ..
            } => self.apply_normal(token, kind, origin_file, origin_rank, capture, dest, promotion),
        }
    }

    /// Apply a whole game record.
    ///
    /// A record that ends with the game still undecided leaves it `Complete`;
    /// a final unit with a single half-move simply means the game ended on
    /// White's move.
    pub fn apply_movetext(&mut self, text: &str) -> Result<(), ChessError> {
        for token in tokenize_movetext(text) {
            self.apply_san(&token)?;
        }
        if !matches!(self.status, GameStatus::Checkmate | GameStatus::Stalemate) {
            self.status = GameStatus::Complete;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_normal(
        &mut self,
        token: &str,
        kind: PieceKind,
        origin_file: Option<u8>,
        origin_rank: Option<u8>,
        capture: bool,
        dest: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), ChessError> {
        // The capture marker is binding: with it the destination must hold an
        // enemy (or be the en-passant square for a pawn), without it the
        // destination must be empty.
        let dest_occ = self.board.get(dest);
        if capture {
            let enemy = dest_occ.is_some_and(|occ| occ.player != self.turn);
            let en_passant = kind == PieceKind::Pawn && self.en_passant == Some(dest);
            if !enemy && !en_passant {
                return Err(ChessError::not_legal(token));
            }
        } else if dest_occ.is_some() {
            return Err(ChessError::not_legal(token));
        }

        if promotion.is_some()
            && (kind != PieceKind::Pawn || dest.rank() != self.turn.promotion_rank())
        {
            return Err(ChessError::not_legal(token));
        }

        let candidates: Vec<Square> = self
            .pieces
            .iter()
            .filter(|p| p.player == self.turn && p.kind == kind)
            .filter(|p| if capture { p.can_capture_to(dest) } else { p.can_move_to(dest) })
            .map(|p| p.square)
            .collect();

        let origin = resolve(&candidates, origin_file, origin_rank, token)?;

        if self.leaves_king_in_check(self.turn, origin, dest) {
            return Err(ChessError::not_legal(token));
        }

        self.commit_move(origin, dest, promotion);
        Ok(())
    }

    fn apply_castle(&mut self, token: &str, kingside: bool) -> Result<(), ChessError> {
        let player = self.turn;
        let back = player.back_rank();
        let king_from = Square::new(4, back);
        let (rook_from, king_to, rook_to, allowed) = if kingside {
            (
                Square::new(7, back),
                Square::new(6, back),
                Square::new(5, back),
                self.castling.kingside(player),
            )
        } else {
            (
                Square::new(0, back),
                Square::new(2, back),
                Square::new(3, back),
                self.castling.queenside(player),
            )
        };
        if !allowed {
            return Err(ChessError::not_legal(token));
        }

        let king_ok = self
            .piece_at(king_from)
            .is_some_and(|p| p.kind == PieceKind::King && p.player == player && !p.has_moved);
        let rook_ok = self
            .piece_at(rook_from)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.player == player && !p.has_moved);
        if !king_ok || !rook_ok {
            return Err(ChessError::not_legal(token));
        }

        // Every square strictly between king and rook is empty exactly when
        // the first blocker from the king toward the rook is the rook itself.
        let toward_rook = if kingside { Direction::East } else { Direction::West };
        if self.board.first_blocked_square(king_from, toward_rook) != Some(rook_from) {
            return Err(ChessError::not_legal(token));
        }

        // The king may not castle out of, through, or into an attack.
        for sq in [king_from, rook_to, king_to] {
            if is_attacked(sq, player.other(), &self.pieces) {
                return Err(ChessError::not_legal(token));
            }
        }

        // King and rook relocate as one atomic update.
        let king_idx = self.piece_index_at(king_from).expect("king checked above");
        let rook_idx = self.piece_index_at(rook_from).expect("rook checked above");
        self.board.remove(king_from);
        self.board.remove(rook_from);
        self.board.place(king_to, Occupant { kind: PieceKind::King, player });
        self.board.place(rook_to, Occupant { kind: PieceKind::Rook, player });
        self.pieces[king_idx].move_to(king_to);
        self.pieces[rook_idx].move_to(rook_to);

        self.castling.clear_side(player);
        self.en_passant = None;
        self.refresh_actual_caches();

        debug!(
            "{:?} castles {}",
            player,
            if kingside { "kingside" } else { "queenside" }
        );
        self.finish_turn();
        Ok(())
    }

    /// Commit a resolved, legality-checked move.
    fn commit_move(&mut self, origin: Square, dest: Square, promotion: Option<PieceKind>) {
        let mover = self.piece_at(origin).expect("origin resolved to a piece");
        let mover_kind = mover.kind;
        let player = self.turn;
        let double_step =
            mover_kind == PieceKind::Pawn && (dest.rank() as i8 - origin.rank() as i8).abs() == 2;
        let captured_rook = self
            .board
            .get(dest)
            .filter(|occ| occ.kind == PieceKind::Rook && occ.player != player)
            .map(|_| dest);

        self.apply_raw(origin, dest);

        // Promotion trigger: pawn reaching the far rank changes kind here,
        // at application time.
        if mover_kind == PieceKind::Pawn && dest.rank() == player.promotion_rank() {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            let idx = self.piece_index_at(dest).expect("mover stands on dest");
            self.pieces[idx].kind = kind;
            self.pieces[idx].generate_naive_cache();
            self.board.place(dest, Occupant { kind, player });
        }

        match mover_kind {
            PieceKind::King => self.castling.clear_side(player),
            PieceKind::Rook => self.clear_rook_right(player, origin),
            _ => {}
        }
        if let Some(sq) = captured_rook {
            self.clear_rook_right(player.other(), sq);
        }

        // Valid only for the immediately following half-move.
        self.en_passant = if double_step {
            Some(origin.offset(0, player.forward()).expect("skipped square is on the board"))
        } else {
            None
        };
        self.refresh_actual_caches();

        debug!("{:?} plays {}{} to {}", player, mover_kind.letter(), origin, dest);
        self.finish_turn();
    }

    /// Board/piece mutation shared by real and trial moves: removes the
    /// captured piece (destination square, or one rank behind it for an
    /// en-passant pawn capture) and relocates the mover. Does not touch
    /// rights, target, turn or caches.
    fn apply_raw(&mut self, origin: Square, dest: Square) {
        let mover_idx = self.piece_index_at(origin).expect("origin occupied");
        let player = self.pieces[mover_idx].player;
        let kind = self.pieces[mover_idx].kind;

        let victim_sq = if kind == PieceKind::Pawn
            && self.en_passant == Some(dest)
            && self.board.is_empty(dest)
        {
            dest.offset(0, -player.forward())
        } else {
            self.board.get(dest).map(|_| dest)
        };
        if let Some(sq) = victim_sq {
            self.remove_piece_at(sq);
        }

        // Capture removal may have reordered the list.
        let mover_idx = self.piece_index_at(origin).expect("mover survives removal");
        self.board.remove(origin);
        self.board.place(dest, Occupant { kind, player });
        self.pieces[mover_idx].move_to(dest);
    }

    /// Would moving origin -> dest leave `player`'s own king in check?
    /// Runs on a scratch clone; the live state never sees the trial.
    fn leaves_king_in_check(&self, player: Player, origin: Square, dest: Square) -> bool {
        let mut scratch = self.clone();
        scratch.apply_raw(origin, dest);
        scratch.en_passant = None;
        scratch.refresh_actual_caches();
        scratch
            .king_square(player)
            .is_some_and(|k| is_check(k, player, &scratch.pieces))
    }

    fn has_any_legal_move(&self, player: Player) -> bool {
        for piece in self.pieces.iter().filter(|p| p.player == player) {
            for &dest in piece.actual_moves.iter().chain(&piece.actual_captures) {
                if !self.leaves_king_in_check(player, piece.square, dest) {
                    return true;
                }
            }
        }
        false
    }

    fn finish_turn(&mut self) {
        self.turn = self.turn.other();
        let in_check = self.in_check();
        let can_move = self.has_any_legal_move(self.turn);
        self.status = match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::AwaitingMove,
        };
        trace!("{:?} to move, status {:?}", self.turn, self.status);
    }

    fn clear_rook_right(&mut self, player: Player, sq: Square) {
        if sq == Square::new(0, player.back_rank()) {
            self.castling.clear_queenside(player);
        } else if sq == Square::new(7, player.back_rank()) {
            self.castling.clear_kingside(player);
        }
    }

    fn piece_index_at(&self, sq: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.square == sq)
    }

    fn remove_piece_at(&mut self, sq: Square) {
        self.board.remove(sq);
        if let Some(idx) = self.piece_index_at(sq) {
            self.pieces.swap_remove(idx);
        }
    }

    fn refresh_actual_caches(&mut self) {
        let en_passant = self.en_passant;
        for piece in self.pieces.iter_mut() {
            piece.generate_actual_cache(&self.board, en_passant);
        }
    }
}
