//! Interactive stdin player.
//!
//! Prompts for a move in SAN or UCI coordinates and re-prompts locally on
//! invalid notation, illegal moves and ambiguous input — none of those ever
//! reach the game loop. The clock keeps running while the human thinks, so
//! a slow answer is a real timeout.

use std::io::Write;

use anyhow::bail;
use async_trait::async_trait;
use game_core::san::{self, ParseMoveError};
use game_core::{color_name, Move, Player, Turn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct HumanPlayer {
    lines: Lines<BufReader<Stdin>>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for HumanPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Player for HumanPlayer {
    fn name(&self) -> &str {
        "human"
    }

    async fn find_move(&mut self, turn: &Turn<'_>) -> anyhow::Result<Move> {
        loop {
            print!("Input move as {}: ", color_name(turn.color));
            std::io::stdout().flush()?;

            let Some(line) = self.lines.next_line().await? else {
                bail!("input stream closed");
            };
            match san::parse_move(turn.board, &line) {
                Ok(mv) => return Ok(mv),
                Err(ParseMoveError::Invalid) => println!("Invalid move notation."),
                Err(ParseMoveError::Illegal) => println!("Illegal move."),
                Err(ParseMoveError::Ambiguous) => {
                    println!("The move is ambiguous. Try again.")
                }
            }
        }
    }
}
