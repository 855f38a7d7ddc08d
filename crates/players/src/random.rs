//! Uniformly random baseline player.
//!
//! Provides no evaluation at all — any real player should beat it. Useful
//! for exercising the harness and as the weakest rung in comparisons.

use anyhow::Context;
use async_trait::async_trait;
use game_core::{Move, Player, Turn};
use rand::seq::SliceRandom;
use rand::thread_rng;

#[derive(Debug, Clone, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    async fn find_move(&mut self, turn: &Turn<'_>) -> anyhow::Result<Move> {
        let moves = turn.board.legal_moves();
        moves
            .choose(&mut thread_rng())
            .copied()
            .context("no legal moves available")
    }
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod random_tests;
