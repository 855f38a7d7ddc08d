//! Game orchestration core for automated chess matches.
//!
//! This crate owns everything between "two move-providers" and "a finished,
//! scored game": the board adapter over the rules library, the two-sided
//! clock with increment, the turn loop with timeout enforcement and
//! legality gating, and the record exporter. Move generation and legality
//! themselves are delegated to `cozy-chess`; player strategies live in the
//! `players` crate and only meet this crate through the [`Player`] trait.

pub mod board;
pub mod clock;
pub mod display;
pub mod error;
pub mod game;
pub mod pgn;
pub mod san;

pub use board::{color_name, Board, IllegalMoveError, Outcome};
pub use clock::{ClockPair, TimeSettings};
pub use error::GameError;
pub use game::{Game, GameReport};

// Re-export the rules-library vocabulary players and runners speak.
pub use cozy_chess::{Color, Move};

use std::time::Duration;

use async_trait::async_trait;

/// Everything a player may look at while choosing a move: its color, the
/// live position (read-only) and both clocks.
pub struct Turn<'a> {
    pub board: &'a Board,
    pub clocks: &'a ClockPair,
    pub color: Color,
}

impl Turn<'_> {
    /// Time left on the player's own clock.
    pub fn my_time(&self) -> Duration {
        self.clocks.remaining(self.color)
    }

    /// Time left on the opposing clock.
    pub fn opponent_time(&self) -> Duration {
        self.clocks.remaining(!self.color)
    }

    /// The budget both sides started from.
    pub fn initial_time(&self) -> Duration {
        self.clocks.initial()
    }
}

/// A move provider.
///
/// `find_move` may suspend on external input (a human, an engine process)
/// or compute synchronously; the loop bounds each call by the caller's
/// remaining clock and drops the future on timeout, so implementations must
/// not rely on running to completion. The returned move must be legal in
/// the current position; the loop does not tolerate illegal returns.
///
/// `initialize` and `close` bracket any external resources: the loop awaits
/// `initialize` on both players before the first turn and `close` after the
/// game ends on every path. Both must be idempotent.
#[async_trait]
pub trait Player: Send {
    /// Short name used in reports and PGN headers.
    fn name(&self) -> &str;

    /// Acquire external resources (idempotent; default no-op).
    async fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Produce one legal move for the current position.
    async fn find_move(&mut self, turn: &Turn<'_>) -> anyhow::Result<Move>;

    /// Release external resources (idempotent; default no-op).
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
