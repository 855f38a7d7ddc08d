//! Batch runner and aggregate statistics.
//!
//! Runs many independent games between two fixed player variants and folds
//! every completed game into one of eight outcome categories plus a running
//! score pair. Timeouts are expected, counted results. Illegal moves and
//! player faults have no well-defined winner: those games are logged,
//! counted under `aborted` and excluded from the score.

use std::path::Path;

use anyhow::Context;
use game_core::{color_name, Color, Game, GameError, Outcome, Player, TimeSettings};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a batch is run.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Number of games to play.
    pub games: u32,
    /// Time control shared by every game.
    pub time: TimeSettings,
    /// Print a per-game trace line.
    pub verbose: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            games: 100,
            time: TimeSettings::default(),
            verbose: false,
        }
    }
}

/// Outcome counters and score accumulators for one batch.
///
/// Serialized field names match the classic report keys, so the JSON output
/// reads `"75_moves"`, `"material"`, and so on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub white_win_checkmate: u32,
    pub black_win_checkmate: u32,
    pub white_win_time: u32,
    pub black_win_time: u32,
    pub stalemate: u32,
    pub repetition: u32,
    pub material: u32,
    #[serde(rename = "75_moves")]
    pub seventyfive_moves: u32,
    /// Games ended by an illegal move or player fault; never scored.
    pub aborted: u32,
    pub score_white: f64,
    pub score_black: f64,
}

impl BatchStats {
    /// Fold one completed game into the counters and the score.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Checkmate {
                winner: Color::White,
            } => self.white_win_checkmate += 1,
            Outcome::Checkmate {
                winner: Color::Black,
            } => self.black_win_checkmate += 1,
            Outcome::Timeout {
                winner: Color::White,
            } => self.white_win_time += 1,
            Outcome::Timeout {
                winner: Color::Black,
            } => self.black_win_time += 1,
            Outcome::Stalemate => self.stalemate += 1,
            Outcome::FivefoldRepetition => self.repetition += 1,
            Outcome::InsufficientMaterial => self.material += 1,
            Outcome::SeventyFiveMoves => self.seventyfive_moves += 1,
        }
        let (white, black) = outcome.scores();
        self.score_white += white;
        self.score_black += black;
    }

    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Scored games only; aborted games are excluded.
    pub fn counted_games(&self) -> u32 {
        self.white_win_checkmate
            + self.black_win_checkmate
            + self.white_win_time
            + self.black_win_time
            + self.stalemate
            + self.repetition
            + self.material
            + self.seventyfive_moves
    }

    /// Final score line, e.g. `WHITE 57.5 - 42.5 BLACK`.
    pub fn score_line(&self) -> String {
        format!("WHITE {} - {} BLACK", self.score_white, self.score_black)
    }

    /// Save the stats as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize stats")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write stats to {}", path.display()))?;
        Ok(())
    }
}

/// Run `options.games` independent games between fresh player instances
/// produced by the two factories, white first.
///
/// A timed-out game is counted as a win for the opponent; an aborted game
/// (illegal move, player fault) is logged and skipped. The batch itself
/// never fails on either.
pub async fn run_batch<W, B>(white: W, black: B, options: &BatchOptions) -> BatchStats
where
    W: Fn() -> Box<dyn Player>,
    B: Fn() -> Box<dyn Player>,
{
    let mut stats = BatchStats::default();
    for index in 1..=options.games {
        let report = Game::new(white(), black(), options.time).play().await;

        let verdict = match &report.result {
            Ok(outcome) => {
                stats.record(outcome);
                match outcome.winner() {
                    Some(winner) => format!("{} wins", color_name(winner)),
                    None => "DRAW".to_string(),
                }
            }
            Err(GameError::Timeout { side, .. }) => {
                let outcome = Outcome::Timeout { winner: !*side };
                stats.record(&outcome);
                format!("{} wins", color_name(!*side))
            }
            Err(err) => {
                warn!(game = index, error = %err, "game aborted");
                stats.record_aborted();
                "NO RESULT".to_string()
            }
        };

        if options.verbose {
            println!(
                "Game {:<5} {:<34} {:<12} {} {}",
                format!("{index}:"),
                report.termination(),
                verdict,
                report.clocks.display(),
                report.move_number()
            );
        }
    }
    stats
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod batch_tests;
