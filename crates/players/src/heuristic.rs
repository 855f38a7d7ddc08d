//! A small lookahead-free heuristic bot.
//!
//! Move policy, in order: play an immediate checkmate if one exists, then
//! any checking move, otherwise pick uniformly among moves that do not draw
//! the game on the spot. When only drawing moves remain, one of them is
//! played — a position can offer nothing else.

use anyhow::Context;
use async_trait::async_trait;
use game_core::{Move, Player, Turn};
use rand::seq::SliceRandom;
use rand::thread_rng;

#[derive(Debug, Clone, Default)]
pub struct HeuristicPlayer;

impl HeuristicPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Player for HeuristicPlayer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn find_move(&mut self, turn: &Turn<'_>) -> anyhow::Result<Move> {
        let board = turn.board;
        let legal = board.legal_moves();

        let mut draws = Vec::new();
        for &mv in &legal {
            if board.is_draw_after(mv)? {
                draws.push(mv);
                continue;
            }
            if board.is_checkmate_after(mv)? {
                return Ok(mv);
            }
        }
        for &mv in &legal {
            if board.is_check_after(mv)? {
                return Ok(mv);
            }
        }

        let preferred: Vec<Move> = legal
            .iter()
            .filter(|mv| !draws.contains(mv))
            .copied()
            .collect();
        let pool = if preferred.is_empty() { &legal } else { &preferred };
        pool.choose(&mut thread_rng())
            .copied()
            .context("no legal moves available")
    }
}

#[cfg(test)]
#[path = "heuristic_tests.rs"]
mod heuristic_tests;
