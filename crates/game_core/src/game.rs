//! The game loop: turn sequencing, per-side clocks, timeout enforcement,
//! legality gating and termination detection.
//!
//! A `Game` is consumed by [`Game::play`]; the returned [`GameReport`] is
//! the terminal state. Exactly one `find_move` call is outstanding at any
//! time, bounded by the mover's remaining clock. When the bound elapses the
//! in-flight future is dropped — an abandoned call can never touch the
//! position, which players only ever see by reference anyway.

use cozy_chess::{Color, Move};
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

use crate::board::{color_name, Board, Outcome};
use crate::clock::{ClockPair, TimeSettings};
use crate::display;
use crate::error::GameError;
use crate::{Player, Turn};

/// One game between two players under a shared time control.
pub struct Game {
    board: Board,
    white: Box<dyn Player>,
    black: Box<dyn Player>,
    clocks: ClockPair,
    turns_made: u32,
    verbose: bool,
}

impl Game {
    pub fn new(white: Box<dyn Player>, black: Box<dyn Player>, settings: TimeSettings) -> Self {
        Self {
            board: Board::startpos(),
            white,
            black,
            clocks: ClockPair::new(settings),
            turns_made: 0,
            verbose: false,
        }
    }

    /// Start from a given position instead of the standard one.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Print the board after every applied move.
    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    /// Full-move number about to be played.
    pub fn move_number(&self) -> u32 {
        self.turns_made / 2 + 1
    }

    /// Drive the game to its terminal state.
    ///
    /// Player lifecycle hooks bracket the loop: `initialize` is awaited on
    /// both players before the first turn, `close` after the loop ends on
    /// every path — normal completion, timeout, illegal move or fault.
    pub async fn play(mut self) -> GameReport {
        let result = match self.initialize_players().await {
            Ok(()) => self.run_loop().await,
            Err(err) => Err(err),
        };
        self.close_players().await;
        GameReport {
            result,
            moves: self.board.moves().to_vec(),
            clocks: self.clocks,
            turns_made: self.turns_made,
            white_name: self.white.name().to_string(),
            black_name: self.black.name().to_string(),
        }
    }

    async fn initialize_players(&mut self) -> Result<(), GameError> {
        for side in [Color::White, Color::Black] {
            let player = match side {
                Color::White => self.white.as_mut(),
                Color::Black => self.black.as_mut(),
            };
            player
                .initialize()
                .await
                .map_err(|source| GameError::PlayerFault {
                    side,
                    move_number: 1,
                    source,
                })?;
        }
        Ok(())
    }

    async fn close_players(&mut self) {
        if let Err(err) = self.white.close().await {
            warn!(error = %err, "failed to close white player");
        }
        if let Err(err) = self.black.close().await {
            warn!(error = %err, "failed to close black player");
        }
    }

    async fn run_loop(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let Some(outcome) = self.board.outcome() {
                return Ok(outcome);
            }

            let side = self.board.side_to_move();
            let move_number = self.move_number();
            let budget = self.clocks.remaining(side);

            let started = Instant::now();
            let answer = {
                let turn = Turn {
                    board: &self.board,
                    clocks: &self.clocks,
                    color: side,
                };
                let mover = match side {
                    Color::White => self.white.as_mut(),
                    Color::Black => self.black.as_mut(),
                };
                timeout(budget, mover.find_move(&turn)).await
            };
            let elapsed = started.elapsed();

            let mv = match answer {
                Ok(Ok(mv)) => mv,
                Ok(Err(source)) => {
                    return Err(GameError::PlayerFault {
                        side,
                        move_number,
                        source,
                    })
                }
                Err(_) => {
                    return Err(GameError::Timeout { side, move_number });
                }
            };

            // The measured think time can still swallow the whole budget if
            // the future finished right on the boundary.
            if !self.clocks.record_move(side, elapsed) {
                return Err(GameError::Timeout { side, move_number });
            }

            if let Err(rejected) = self.board.try_push(mv) {
                warn!(side = ?side, mv = %rejected.mv, move_number, "illegal move");
                return Err(GameError::IllegalMove {
                    side,
                    mv: rejected.mv,
                    move_number,
                });
            }
            self.turns_made += 1;

            debug!(
                side = ?side,
                mv = %mv,
                elapsed_ms = elapsed.as_millis() as u64,
                clocks = %self.clocks.display(),
                "move played"
            );
            if self.verbose {
                println!("\n\n\n{}", display::pretty(&self.board));
            }
        }
    }
}

/// Terminal state of a finished game.
pub struct GameReport {
    /// The board outcome, or why the game ended early.
    pub result: Result<Outcome, GameError>,
    /// Applied moves, in order.
    pub moves: Vec<Move>,
    /// Both clocks as they stood at the end.
    pub clocks: ClockPair,
    /// Half-moves actually applied.
    pub turns_made: u32,
    pub white_name: String,
    pub black_name: String,
}

impl GameReport {
    /// Full-move number the game ended on.
    pub fn move_number(&self) -> u32 {
        self.turns_made / 2 + 1
    }

    /// Termination reason as printed in batch traces.
    pub fn termination(&self) -> &'static str {
        match &self.result {
            Ok(outcome) => outcome.label(),
            Err(GameError::Timeout { .. }) => "time forfeit",
            Err(GameError::IllegalMove { .. }) => "illegal move",
            Err(GameError::PlayerFault { .. }) => "player fault",
        }
    }

    /// One-line verdict for single-game runs.
    pub fn verdict_line(&self) -> String {
        match &self.result {
            Ok(outcome) => match outcome.winner() {
                Some(winner) => format!(
                    "{} wins by {} after {} moves",
                    color_name(winner),
                    outcome.label(),
                    self.move_number()
                ),
                None => format!(
                    "Draw by {} after {} moves",
                    outcome.label(),
                    self.move_number()
                ),
            },
            Err(GameError::Timeout { side, move_number }) => {
                format!("{} loses by timeout on move {}", color_name(*side), move_number)
            }
            Err(err) => format!("Game aborted: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
