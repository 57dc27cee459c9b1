use std::fmt;

/// A board square: file 0..=7 (a..h), rank 0..=7 (ranks 1..8).
///
/// The algebraic form (`"e4"`) and the coordinate pair are a bijection over
/// all 64 squares.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file <= 7 && rank <= 7);
        Self { file, rank }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Flat 0..64 index, rank-major.
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// The square offset by `(dfile, drank)`, or `None` off the board.
    #[inline]
    pub fn offset(self, dfile: i8, drank: i8) -> Option<Square> {
        let f = self.file as i8 + dfile;
        let r = self.rank as i8 + drank;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::new(f as u8, r as u8))
        } else {
            None
        }
    }

    /// Parse `"a1"`..`"h8"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = file_from_char(chars.next()?)?;
        let rank = rank_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(file, rank))
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::new(file, rank)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

#[inline]
pub fn file_from_char(c: char) -> Option<u8> {
    match c {
        'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

#[inline]
pub fn rank_from_char(c: char) -> Option<u8> {
    match c {
        '1'..='8' => Some(c as u8 - b'1'),
        _ => None,
    }
}
