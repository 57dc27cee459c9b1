//! Parsing of pre-tokenized SAN half-moves and of raw movetext.
//!
//! Grammar per token: optional piece letter (`RNBQK`, absent = pawn),
//! optional origin file, optional origin rank, optional capture marker `x`,
//! mandatory destination, optional promotion `=[RNBQ]`, optional `+`/`#`
//! suffix; or the literal `O-O` / `O-O-O`.

use crate::core::square::{file_from_char, rank_from_char, Square};
use crate::error::ChessError;
use crate::pieces::PieceKind;

/// Check or checkmate suffix on a token. Carried but never trusted: the
/// engine derives check status itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Suffix {
    Check,
    Checkmate,
}

/// One parsed half-move token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HalfMove {
    Normal {
        kind: PieceKind,
        origin_file: Option<u8>,
        origin_rank: Option<u8>,
        capture: bool,
        dest: Square,
        promotion: Option<PieceKind>,
        suffix: Option<Suffix>,
    },
    CastleKingside { suffix: Option<Suffix> },
    CastleQueenside { suffix: Option<Suffix> },
}

/// Parse a single half-move token.
pub fn parse_half_move(token: &str) -> Result<HalfMove, ChessError> {
    let (body, suffix) = split_suffix(token);

    match body {
        "O-O" => return Ok(HalfMove::CastleKingside { suffix }),
        "O-O-O" => return Ok(HalfMove::CastleQueenside { suffix }),
        _ => {}
    }

    let (body, promotion) = split_promotion(body, token)?;

    let mut chars: Vec<char> = body.chars().collect();
    if !body.is_ascii() || chars.len() < 2 {
        return Err(ChessError::parse(token));
    }

    // Destination is the final file+rank pair; everything else is read off
    // the front.
    let dest_rank = rank_from_char(chars.pop().expect("len checked"));
    let dest_file = file_from_char(chars.pop().expect("len checked"));
    let dest = match (dest_file, dest_rank) {
        (Some(f), Some(r)) => Square::new(f, r),
        _ => return Err(ChessError::parse(token)),
    };

    let mut rest = chars.into_iter().peekable();

    let kind = match rest.peek().copied().and_then(PieceKind::from_letter) {
        Some(kind) => {
            rest.next();
            kind
        }
        None => PieceKind::Pawn,
    };

    let origin_file = match rest.peek().copied().and_then(file_from_char) {
        Some(f) => {
            rest.next();
            Some(f)
        }
        None => None,
    };
    let origin_rank = match rest.peek().copied().and_then(rank_from_char) {
        Some(r) => {
            rest.next();
            Some(r)
        }
        None => None,
    };
    let capture = rest.peek() == Some(&'x');
    if capture {
        rest.next();
    }

    if rest.next().is_some() {
        return Err(ChessError::parse(token));
    }

    Ok(HalfMove::Normal {
        kind,
        origin_file,
        origin_rank,
        capture,
        dest,
        promotion,
        suffix,
    })
}

fn split_suffix(token: &str) -> (&str, Option<Suffix>) {
    if let Some(body) = token.strip_suffix('#') {
        (body, Some(Suffix::Checkmate))
    } else if let Some(body) = token.strip_suffix('+') {
        (body, Some(Suffix::Check))
    } else {
        (token, None)
    }
}

fn split_promotion<'a>(body: &'a str, token: &str) -> Result<(&'a str, Option<PieceKind>), ChessError> {
    let Some((head, tail)) = body.split_once('=') else {
        return Ok((body, None));
    };
    let mut tail_chars = tail.chars();
    let kind = tail_chars
        .next()
        .and_then(PieceKind::from_letter)
        .filter(|&k| k != PieceKind::King);
    match (kind, tail_chars.next()) {
        (Some(kind), None) => Ok((head, Some(kind))),
        _ => Err(ChessError::parse(token)),
    }
}

/// Split raw movetext into bare half-move tokens.
///
/// Move-number markers (`"1."`, `"12..."`, attached or detached) and the PGN
/// result markers (`1-0`, `0-1`, `1/2-1/2`, `*`) are stripped; each numbered
/// unit may hold fewer than two half-moves only at the end of the game.
pub fn tokenize_movetext(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for word in text.split_whitespace() {
        if matches!(word, "1-0" | "0-1" | "1/2-1/2" | "*") {
            continue;
        }
        let bare = word
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start_matches('.');
        if bare.is_empty() {
            continue;
        }
        out.push(bare.to_string());
    }
    out
}
