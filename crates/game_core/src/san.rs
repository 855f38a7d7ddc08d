//! Standard algebraic notation: rendering for the record exporter, tolerant
//! parsing for interactive input, and UCI coordinate conversion for engine
//! traffic.
//!
//! Parsing matches the input against the rendered SAN of every legal move
//! rather than re-deriving move semantics, so it can cleanly distinguish
//! "no such move" from "more than one such move".

use cozy_chess::{File, Move, Piece, Rank, Square};
use thiserror::Error;

use crate::board::{Board, IllegalMoveError};

/// Interactive move input that could not be resolved to a single legal move.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("invalid move notation")]
    Invalid,
    #[error("illegal move")]
    Illegal,
    #[error("the move is ambiguous")]
    Ambiguous,
}

/// Render a legal move as SAN, including `+`/`#` suffixes.
pub fn to_san(board: &Board, mv: Move) -> Result<String, IllegalMoveError> {
    if !board.is_legal(mv) {
        return Err(IllegalMoveError { mv });
    }
    let inner = board.inner();
    let stm = inner.side_to_move();
    let Some(piece) = inner.piece_on(mv.from) else {
        return Err(IllegalMoveError { mv });
    };

    let mut san = if piece == Piece::King && inner.color_on(mv.to) == Some(stm) {
        // The library encodes castling as the king capturing its own rook.
        if (mv.to.file() as u8) > (mv.from.file() as u8) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let capture = inner.color_on(mv.to) == Some(!stm)
            || (piece == Piece::Pawn && mv.from.file() != mv.to.file());
        let mut s = String::new();
        if piece == Piece::Pawn {
            if capture {
                s.push(file_char(mv.from.file()));
            }
        } else {
            s.push(piece_letter(piece));
            let (need_file, need_rank) = disambiguation(board, mv, piece);
            if need_file {
                s.push(file_char(mv.from.file()));
            }
            if need_rank {
                s.push(rank_char(mv.from.rank()));
            }
        }
        if capture {
            s.push('x');
        }
        s.push_str(&mv.to.to_string());
        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(piece_letter(promo));
        }
        s
    };

    let next = board.position_after(&[mv])?;
    if next.in_check() {
        san.push(if next.legal_moves().is_empty() { '#' } else { '+' });
    }
    Ok(san)
}

/// Minimal SAN disambiguation: file first, then rank, then both.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> (bool, bool) {
    let inner = board.inner();
    let rivals: Vec<Square> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from && inner.piece_on(m.from) == Some(piece))
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return (false, false);
    }
    let file_shared = rivals.iter().any(|sq| sq.file() == mv.from.file());
    let rank_shared = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
    if !file_shared {
        (true, false)
    } else if !rank_shared {
        (false, true)
    } else {
        (true, true)
    }
}

/// Resolve a UCI coordinate string against the legal moves of a position.
///
/// Accepts both the library's king-takes-rook castling encoding and the
/// standard `e1g1`-style coordinates engines emit.
pub fn from_uci(board: &Board, text: &str) -> Option<Move> {
    let legal = board.legal_moves();
    if let Some(mv) = legal.iter().find(|m| m.to_string() == text) {
        return Some(*mv);
    }
    let remapped = match text {
        "e1g1" => "e1h1",
        "e1c1" => "e1a1",
        "e8g8" => "e8h8",
        "e8c8" => "e8a8",
        _ => return None,
    };
    legal.iter().find(|m| m.to_string() == remapped).copied()
}

/// Resolve interactive input (SAN or UCI coordinates) to one legal move.
pub fn parse_move(board: &Board, input: &str) -> Result<Move, ParseMoveError> {
    let cleaned = input.trim().trim_end_matches(['+', '#', '!', '?']);
    if cleaned.is_empty() {
        return Err(ParseMoveError::Invalid);
    }
    // Tolerate zero-style castling input.
    let normalized = cleaned.replace('0', "O");

    if looks_like_coords(cleaned) {
        let lowered = cleaned.to_ascii_lowercase();
        return from_uci(board, &lowered).ok_or(ParseMoveError::Illegal);
    }

    let mut exact = Vec::new();
    let mut loose = Vec::new();
    for mv in board.legal_moves() {
        let Ok(san) = to_san(board, mv) else { continue };
        let bare = san.trim_end_matches(['+', '#']);
        if bare == normalized {
            exact.push(mv);
        } else if strip_disambiguation(bare) == strip_disambiguation(&normalized) {
            loose.push(mv);
        }
    }
    match exact.len() {
        1 => return Ok(exact[0]),
        n if n > 1 => return Err(ParseMoveError::Ambiguous),
        _ => {}
    }
    match loose.len() {
        0 => {
            if looks_like_san(&normalized) {
                Err(ParseMoveError::Illegal)
            } else {
                Err(ParseMoveError::Invalid)
            }
        }
        1 => Ok(loose[0]),
        _ => Err(ParseMoveError::Ambiguous),
    }
}

/// `e2e4` / `e7e8q` shaped input.
fn looks_like_coords(text: &str) -> bool {
    let b = text.as_bytes();
    if b.len() != 4 && b.len() != 5 {
        return false;
    }
    let file_ok = |f: u8| (b'a'..=b'h').contains(&f.to_ascii_lowercase());
    let rank_ok = |r: u8| (b'1'..=b'8').contains(&r);
    file_ok(b[0])
        && rank_ok(b[1])
        && file_ok(b[2])
        && rank_ok(b[3])
        && (b.len() == 4 || matches!(b[4].to_ascii_lowercase(), b'q' | b'r' | b'b' | b'n'))
}

fn looks_like_san(text: &str) -> bool {
    text.chars()
        .all(|c| "KQRBNabcdefgh12345678xO-=".contains(c))
}

/// Reduce a bare SAN token to piece letter, capture marker and destination,
/// so redundant or missing disambiguation still matches.
fn strip_disambiguation(san: &str) -> String {
    let mut chars = san.chars();
    match chars.next() {
        Some(first @ ('K' | 'Q' | 'R' | 'B' | 'N')) => {
            let rest: String = chars.collect();
            let capture = rest.contains('x');
            let squares: String = rest
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect();
            let dest = if squares.len() >= 2 {
                squares[squares.len() - 2..].to_string()
            } else {
                squares
            };
            format!("{first}{}{dest}", if capture { "x" } else { "" })
        }
        _ => san.to_string(),
    }
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn file_char(file: File) -> char {
    (b'a' + file as u8) as char
}

fn rank_char(rank: Rank) -> char {
    (b'1' + rank as u8) as char
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
