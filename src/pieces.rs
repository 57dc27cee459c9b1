use rustc_hash::FxHashSet;

use crate::core::board::{Board, Direction};
use crate::core::square::Square;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Rank step of "forward" for this owner.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    #[inline]
    pub fn back_rank(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    /// The far rank; a pawn arriving here promotes.
    #[inline]
    pub fn promotion_rank(self) -> u8 {
        self.other().back_rank()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// SAN piece letter; pawns have none.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c {
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Ray directions for sliding kinds; empty for the rest.
    #[inline]
    pub fn slide_dirs(self) -> &'static [Direction] {
        use Direction::*;
        match self {
            PieceKind::Rook => &[North, East, South, West],
            PieceKind::Bishop => &[NorthEast, SouthEast, SouthWest, NorthWest],
            PieceKind::Queen => &Direction::ALL,
            _ => &[],
        }
    }
}

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// A piece on the board, with its movement caches.
///
/// `naive_moves`/`naive_captures` are pure geometry from the current square
/// (recomputed on relocation); `actual_moves`/`actual_captures` additionally
/// respect the live board and are always rebuilt from a snapshot, never
/// carried stale across moves. Invariant: each actual cache is a subset of
/// its naive cache.
#[derive(Clone, Debug)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
    pub square: Square,
    pub has_moved: bool,
    pub naive_moves: FxHashSet<Square>,
    pub naive_captures: FxHashSet<Square>,
    pub actual_moves: FxHashSet<Square>,
    pub actual_captures: FxHashSet<Square>,
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player, square: Square) -> Self {
        let mut piece = Self {
            player,
            kind,
            square,
            has_moved: false,
            naive_moves: FxHashSet::default(),
            naive_captures: FxHashSet::default(),
            actual_moves: FxHashSet::default(),
            actual_captures: FxHashSet::default(),
        };
        piece.generate_naive_cache();
        piece
    }

    /// Relocate, mark as moved, and rebuild the geometric caches.
    pub fn move_to(&mut self, dest: Square) {
        self.square = dest;
        self.has_moved = true;
        self.generate_naive_cache();
    }

    #[inline]
    pub fn can_move_to(&self, sq: Square) -> bool {
        self.actual_moves.contains(&sq)
    }

    /// Pawns capture on different squares than they move to; every other
    /// kind captures exactly where it moves.
    #[inline]
    pub fn can_capture_to(&self, sq: Square) -> bool {
        match self.kind {
            PieceKind::Pawn => self.actual_captures.contains(&sq),
            _ => self.can_move_to(sq),
        }
    }

    /// Rebuild `naive_moves`/`naive_captures`: geometry only, no board.
    pub fn generate_naive_cache(&mut self) {
        self.naive_moves.clear();
        self.naive_captures.clear();

        match self.kind {
            PieceKind::Pawn => self.generate_pawn_naive(),
            PieceKind::Rook => self.generate_horizontal(true, true, 7),
            PieceKind::Knight => {
                for (df, dr) in KNIGHT_OFFSETS {
                    if let Some(sq) = self.square.offset(df, dr) {
                        self.naive_moves.insert(sq);
                    }
                }
            }
            PieceKind::Bishop => self.generate_diagonal(true, 7),
            PieceKind::Queen => {
                self.generate_horizontal(true, true, 7);
                self.generate_diagonal(true, 7);
            }
            PieceKind::King => {
                self.generate_horizontal(true, true, 1);
                self.generate_diagonal(true, 1);
            }
        }

        if self.kind != PieceKind::Pawn {
            self.naive_captures = self.naive_moves.clone();
        }
    }

    /// Rebuild `actual_moves`/`actual_captures` against a board snapshot.
    ///
    /// A pure function of (piece geometry, snapshot, en-passant target);
    /// sliding rays are truncated at the first blocker reported by the
    /// board's ray engine.
    pub fn generate_actual_cache(&mut self, board: &Board, en_passant: Option<Square>) {
        self.actual_moves.clear();
        self.actual_captures.clear();

        match self.kind {
            PieceKind::Pawn => self.generate_pawn_actual(board, en_passant),
            PieceKind::Knight | PieceKind::King => {
                // Never blocked en route; only the destination matters.
                for &sq in &self.naive_moves {
                    match board.get(sq) {
                        None => {
                            self.actual_moves.insert(sq);
                        }
                        Some(occ) if occ.player != self.player => {
                            self.actual_moves.insert(sq);
                            self.actual_captures.insert(sq);
                        }
                        Some(_) => {}
                    }
                }
            }
            _ => self.generate_sliding_actual(board),
        }
    }

    fn generate_pawn_naive(&mut self) {
        let limit = if self.has_moved { 1 } else { 2 };
        self.generate_horizontal(false, false, limit);

        let fwd = self.player.forward();
        for df in [-1, 1] {
            if let Some(sq) = self.square.offset(df, fwd) {
                self.naive_captures.insert(sq);
            }
        }
    }

    fn generate_pawn_actual(&mut self, board: &Board, en_passant: Option<Square>) {
        // Forward squares stay only while unoccupied: the double step needs
        // both the skipped square and the destination free.
        let fwd = self.player.forward();
        for step in 1..=2 {
            let Some(sq) = self.square.offset(0, step * fwd) else {
                break;
            };
            if !self.naive_moves.contains(&sq) || !board.is_empty(sq) {
                break;
            }
            self.actual_moves.insert(sq);
        }

        for &sq in &self.naive_captures {
            let enemy = board.get(sq).is_some_and(|occ| occ.player != self.player);
            if enemy || en_passant == Some(sq) {
                self.actual_captures.insert(sq);
            }
        }
    }

    fn generate_sliding_actual(&mut self, board: &Board) {
        for &dir in self.kind.slide_dirs() {
            let blocker = board.first_blocked_square(self.square, dir);

            let (df, dr) = dir.delta();
            let mut cur = self.square.offset(df, dr);
            while let Some(sq) = cur {
                if Some(sq) == blocker {
                    break;
                }
                if self.naive_moves.contains(&sq) {
                    self.actual_moves.insert(sq);
                }
                cur = sq.offset(df, dr);
            }

            if let Some(sq) = blocker {
                if self.naive_moves.contains(&sq)
                    && board.get(sq).is_some_and(|occ| occ.player != self.player)
                {
                    self.actual_moves.insert(sq);
                    self.actual_captures.insert(sq);
                }
            }
        }
    }

    /// Shared horizontal/vertical generator. Forward movement is always
    /// allowed; backward and sideways are opt-in. `limit` caps the ray
    /// length in squares.
    fn generate_horizontal(&mut self, backward: bool, sideways: bool, limit: u8) {
        let fwd = self.player.forward();
        self.walk(0, fwd, limit);
        if backward {
            self.walk(0, -fwd, limit);
        }
        if sideways {
            self.walk(1, 0, limit);
            self.walk(-1, 0, limit);
        }
    }

    /// Shared diagonal generator, same forward-relative convention.
    fn generate_diagonal(&mut self, backward: bool, limit: u8) {
        let fwd = self.player.forward();
        self.walk(1, fwd, limit);
        self.walk(-1, fwd, limit);
        if backward {
            self.walk(1, -fwd, limit);
            self.walk(-1, -fwd, limit);
        }
    }

    fn walk(&mut self, df: i8, dr: i8, limit: u8) {
        let mut cur = self.square;
        for _ in 0..limit {
            match cur.offset(df, dr) {
                Some(sq) => {
                    self.naive_moves.insert(sq);
                    cur = sq;
                }
                None => break,
            }
        }
    }
}
