use crate::core::square::Square;
use crate::pieces::{PieceKind, Player};

/// One occupied square: which kind of piece, owned by whom.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Occupant {
    pub kind: PieceKind,
    pub player: Player,
}

/// The eight compass directions, from White's side of the board
/// (north = increasing rank).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit `(dfile, drank)` step.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }
}

/// Occupancy grid plus the ray engine.
///
/// Every square is assigned one forward-diagonal id (constant along the
/// (+1,+1) direction) and one backward-diagonal id (constant along (+1,-1));
/// the 15+15 diagonal square lists are built once at construction so diagonal
/// rays are enumerated from a stored list rather than walked per call.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Occupant>; 64],
    forward_diag: [u8; 64],
    backward_diag: [u8; 64],
    // Indexed by diagonal id; squares in ascending file order.
    forward_diag_squares: Vec<Vec<Square>>,
    backward_diag_squares: Vec<Vec<Square>>,
}

impl Board {
    /// An empty board.
    pub fn empty() -> Self {
        let mut forward_diag = [0u8; 64];
        let mut backward_diag = [0u8; 64];
        let mut forward_diag_squares = vec![Vec::new(); 15];
        let mut backward_diag_squares = vec![Vec::new(); 15];

        for sq in Square::all() {
            // file - rank is constant along (+1,+1); file + rank along (+1,-1).
            let fwd = (sq.file() + 7 - sq.rank()) as usize;
            let bwd = (sq.file() + sq.rank()) as usize;
            forward_diag[sq.index()] = fwd as u8;
            backward_diag[sq.index()] = bwd as u8;
            forward_diag_squares[fwd].push(sq);
            backward_diag_squares[bwd].push(sq);
        }
        for list in forward_diag_squares.iter_mut().chain(backward_diag_squares.iter_mut()) {
            list.sort_by_key(|sq| sq.file());
        }

        Self {
            grid: [None; 64],
            forward_diag,
            backward_diag,
            forward_diag_squares,
            backward_diag_squares,
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        use PieceKind::*;

        let mut board = Self::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as u8;
            board.place(Square::new(file, 0), Occupant { kind, player: Player::White });
            board.place(Square::new(file, 1), Occupant { kind: Pawn, player: Player::White });
            board.place(Square::new(file, 6), Occupant { kind: Pawn, player: Player::Black });
            board.place(Square::new(file, 7), Occupant { kind, player: Player::Black });
        }
        board
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Occupant> {
        self.grid[sq.index()]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.grid[sq.index()].is_none()
    }

    #[inline]
    pub fn place(&mut self, sq: Square, occ: Occupant) {
        self.grid[sq.index()] = Some(occ);
    }

    /// Clears a square, returning what stood there.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Occupant> {
        self.grid[sq.index()].take()
    }

    #[inline]
    pub fn forward_diagonal_id(&self, sq: Square) -> u8 {
        self.forward_diag[sq.index()]
    }

    #[inline]
    pub fn backward_diagonal_id(&self, sq: Square) -> u8 {
        self.backward_diag[sq.index()]
    }

    /// Squares sharing `sq`'s forward diagonal, ascending file.
    pub fn forward_diagonal(&self, sq: Square) -> &[Square] {
        &self.forward_diag_squares[self.forward_diagonal_id(sq) as usize]
    }

    /// Squares sharing `sq`'s backward diagonal, ascending file.
    pub fn backward_diagonal(&self, sq: Square) -> &[Square] {
        &self.backward_diag_squares[self.backward_diagonal_id(sq) as usize]
    }

    /// Nearest occupied square strictly beyond `origin` in `dir`, or `None`
    /// if the edge is reached unoccupied.
    ///
    /// Reveals only the square; callers re-read the board to see who stands
    /// there.
    pub fn first_blocked_square(&self, origin: Square, dir: Direction) -> Option<Square> {
        if dir.is_diagonal() {
            return self.first_blocked_diagonal(origin, dir);
        }
        let (df, dr) = dir.delta();
        let mut cur = origin.offset(df, dr);
        while let Some(sq) = cur {
            if !self.is_empty(sq) {
                return Some(sq);
            }
            cur = sq.offset(df, dr);
        }
        None
    }

    fn first_blocked_diagonal(&self, origin: Square, dir: Direction) -> Option<Square> {
        let list = match dir {
            Direction::NorthEast | Direction::SouthWest => self.forward_diagonal(origin),
            Direction::SouthEast | Direction::NorthWest => self.backward_diagonal(origin),
            _ => unreachable!(),
        };
        let pos = list
            .iter()
            .position(|&sq| sq == origin)
            .expect("origin is on its own diagonal");

        // Lists are in ascending file order; NE and SE move up the list.
        let ascending = matches!(dir, Direction::NorthEast | Direction::SouthEast);
        if ascending {
            list[pos + 1..].iter().copied().find(|&sq| !self.is_empty(sq))
        } else {
            list[..pos].iter().rev().copied().find(|&sq| !self.is_empty(sq))
        }
    }
}
