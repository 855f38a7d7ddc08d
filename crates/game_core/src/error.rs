//! Game-level error taxonomy.
//!
//! Only two conditions end a game early: a player exceeding its clock and a
//! player producing a move the position rejects. Both carry the offending
//! side and the full-move number so callers can score and report them.
//! Player implementation failures (a crashed engine process, a closed pipe)
//! are wrapped as [`GameError::PlayerFault`] and treated like an illegal
//! move by the batch runner: the game is aborted, the batch continues.

use cozy_chess::{Color, Move};
use thiserror::Error;

/// Why a game ended without a board outcome.
#[derive(Debug, Error)]
pub enum GameError {
    /// A side failed to produce a move within its remaining clock time.
    #[error("{side:?} ran out of time on move {move_number}")]
    Timeout { side: Color, move_number: u32 },

    /// A side returned a move that is not legal in the current position.
    /// The position is left exactly as it was before the attempt.
    #[error("{side:?} played illegal move {mv} on move {move_number}")]
    IllegalMove {
        side: Color,
        mv: Move,
        move_number: u32,
    },

    /// A player implementation failed outright (engine crash, broken pipe,
    /// unparseable engine output, ...).
    #[error("{side:?} player failed on move {move_number}: {source}")]
    PlayerFault {
        side: Color,
        move_number: u32,
        #[source]
        source: anyhow::Error,
    },
}

impl GameError {
    /// The side responsible for the early termination.
    pub fn side(&self) -> Color {
        match self {
            GameError::Timeout { side, .. }
            | GameError::IllegalMove { side, .. }
            | GameError::PlayerFault { side, .. } => *side,
        }
    }
}
