//! Board adapter over the `cozy-chess` rules library.
//!
//! The library provides rules-correct move generation, legality checks and
//! Zobrist hashing, but keeps no history. This adapter owns the pieces the
//! game loop needs on top of that: the applied move stack, the hash of every
//! position reached (for fivefold repetition) and its own count of plies
//! since the last capture or pawn move (for the 75-move rule).
//!
//! Lookahead queries (`is_checkmate_after` and friends) work on clones and
//! never leave an observable mark on the live position.

use std::fmt;

use cozy_chess::{Color, File, Move, Piece, Rank, Square};
use thiserror::Error;

/// A move was rejected by legality validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("illegal move {mv}")]
pub struct IllegalMoveError {
    pub mv: Move,
}

/// Terminal classification of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Timeout { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    SeventyFiveMoves,
}

impl Outcome {
    /// The winning side, `None` for draws.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::Timeout { winner } => Some(*winner),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }

    /// Termination reason as printed in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Timeout { .. } => "time forfeit",
            Outcome::Stalemate => "stalemate",
            Outcome::InsufficientMaterial => "insufficient material",
            Outcome::FivefoldRepetition => "fivefold repetition",
            Outcome::SeventyFiveMoves => "75-move rule",
        }
    }

    /// `(white, black)` score contribution: win 1, draw 0.5, loss 0.
    pub fn scores(&self) -> (f64, f64) {
        match self.winner() {
            Some(Color::White) => (1.0, 0.0),
            Some(Color::Black) => (0.0, 1.0),
            None => (0.5, 0.5),
        }
    }

    /// PGN result token.
    pub fn result_token(&self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(winner) => write!(f, "{} wins by {}", color_name(winner), self.label()),
            None => write!(f, "draw by {}", self.label()),
        }
    }
}

/// Upper-case side name as used in CLI verdicts.
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

/// A chess position plus the history the rules library does not keep.
#[derive(Debug, Clone)]
pub struct Board {
    inner: cozy_chess::Board,
    /// Zobrist hash of every position reached, current one included.
    history: Vec<u64>,
    /// Applied moves, in order.
    moves: Vec<Move>,
    /// Plies since the last capture or pawn move. Tracked here because the
    /// library's own halfmove clock stops at the fifty-move boundary.
    quiet_plies: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Self::wrap(cozy_chess::Board::default())
    }

    /// Build a position from a FEN string.
    pub fn from_fen(fen: &str) -> anyhow::Result<Self> {
        let inner: cozy_chess::Board = fen
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid FEN {fen:?}: {e}"))?;
        Ok(Self::wrap(inner))
    }

    fn wrap(inner: cozy_chess::Board) -> Self {
        let quiet_plies = u32::from(inner.halfmove_clock());
        let history = vec![inner.hash()];
        Self {
            inner,
            history,
            moves: Vec::new(),
            quiet_plies,
        }
    }

    pub(crate) fn inner(&self) -> &cozy_chess::Board {
        &self.inner
    }

    pub fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.inner.piece_on(square)
    }

    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.inner.color_on(square)
    }

    /// Position as a FEN string.
    pub fn fen(&self) -> String {
        self.inner.to_string()
    }

    /// Moves applied so far, in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Plies since the last capture or pawn move.
    pub fn quiet_plies(&self) -> u32 {
        self.quiet_plies
    }

    /// All legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.inner.generate_moves(|batch| {
            for mv in batch {
                moves.push(mv);
            }
            false
        });
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.inner.is_legal(mv)
    }

    /// Is the side to move in check?
    pub fn in_check(&self) -> bool {
        !self.inner.checkers().is_empty()
    }

    /// Validate and apply a move. On rejection the position is untouched.
    pub fn try_push(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        if !self.inner.is_legal(mv) {
            return Err(IllegalMoveError { mv });
        }
        let pawn_move = self.inner.piece_on(mv.from) == Some(Piece::Pawn);
        let capture = self.inner.color_on(mv.to) == Some(!self.inner.side_to_move());
        self.inner.play_unchecked(mv);
        if pawn_move || capture {
            self.quiet_plies = 0;
        } else {
            self.quiet_plies += 1;
        }
        self.history.push(self.inner.hash());
        self.moves.push(mv);
        Ok(())
    }

    /// How many times the current position has occurred, itself included.
    fn repetitions(&self) -> usize {
        let current = self.inner.hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    /// Terminal classification, `None` while the game is still on.
    ///
    /// Checked in order: checkmate, insufficient material, stalemate,
    /// 75-move rule, fivefold repetition.
    pub fn outcome(&self) -> Option<Outcome> {
        let no_moves = self.legal_moves().is_empty();
        if no_moves && self.in_check() {
            return Some(Outcome::Checkmate {
                winner: !self.side_to_move(),
            });
        }
        if self.insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if no_moves {
            return Some(Outcome::Stalemate);
        }
        if self.quiet_plies >= 150 {
            return Some(Outcome::SeventyFiveMoves);
        }
        if self.repetitions() >= 5 {
            return Some(Outcome::FivefoldRepetition);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Neither side retains mating material: bare kings, a single minor
    /// piece in total, or nothing but same-colored bishops besides the kings.
    fn insufficient_material(&self) -> bool {
        let heavy = self.inner.pieces(Piece::Pawn)
            | self.inner.pieces(Piece::Rook)
            | self.inner.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = self.inner.pieces(Piece::Knight);
        let bishops = self.inner.pieces(Piece::Bishop);
        if !knights.is_empty() {
            return knights.len() == 1 && bishops.is_empty();
        }
        let mut shades = [false; 2];
        for sq in bishops {
            shades[(sq.file() as usize + sq.rank() as usize) % 2] = true;
        }
        !(shades[0] && shades[1])
    }

    /// The position after a sequence of legal moves; the live position is
    /// untouched either way.
    pub fn position_after(&self, line: &[Move]) -> Result<Board, IllegalMoveError> {
        let mut next = self.clone();
        for &mv in line {
            next.try_push(mv)?;
        }
        Ok(next)
    }

    /// Would this move give check?
    pub fn is_check_after(&self, mv: Move) -> Result<bool, IllegalMoveError> {
        Ok(self.position_after(&[mv])?.in_check())
    }

    /// Would this move deliver checkmate?
    pub fn is_checkmate_after(&self, mv: Move) -> Result<bool, IllegalMoveError> {
        let next = self.position_after(&[mv])?;
        Ok(next.in_check() && next.legal_moves().is_empty())
    }

    /// Would this move leave the opponent stalemated?
    pub fn is_stalemate_after(&self, mv: Move) -> Result<bool, IllegalMoveError> {
        let next = self.position_after(&[mv])?;
        Ok(!next.in_check() && next.legal_moves().is_empty())
    }

    /// Would this move complete a fivefold repetition?
    pub fn is_fivefold_repetition_after(&self, mv: Move) -> Result<bool, IllegalMoveError> {
        Ok(self.position_after(&[mv])?.repetitions() >= 5)
    }

    /// Would this move draw the game on the spot?
    pub fn is_draw_after(&self, mv: Move) -> Result<bool, IllegalMoveError> {
        Ok(self.is_stalemate_after(mv)? || self.is_fivefold_repetition_after(mv)?)
    }
}

impl fmt::Display for Board {
    /// Plain piece grid, rank 8 first; white pieces upper-case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &file) in File::ALL.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                let square = Square::new(file, rank);
                let glyph = match (self.inner.piece_on(square), self.inner.color_on(square)) {
                    (Some(piece), Some(color)) => piece_char(piece, color),
                    _ => '.',
                };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

/// FEN-style piece letter: upper-case for white, lower-case for black.
pub fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
