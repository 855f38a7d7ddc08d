//! PGN record export.
//!
//! A finished move sequence is replayed from the starting position and
//! rendered as numbered SAN movetext. The `Event` tag carries a short
//! content hash of the movetext, which is enough to tell games apart when a
//! batch writes several records.

use std::path::Path;

use anyhow::Context;
use chrono::Local;
use cozy_chess::Move;
use sha2::{Digest, Sha256};

use crate::board::{Board, IllegalMoveError, Outcome};
use crate::san;

/// Render a complete PGN document for a finished game.
pub fn render(
    moves: &[Move],
    white: &str,
    black: &str,
    outcome: Option<&Outcome>,
) -> Result<String, IllegalMoveError> {
    let movetext = movetext(moves, outcome)?;
    let digest = Sha256::digest(movetext.as_bytes());
    let tag = format!("{:02x}{:02x}", digest[0], digest[1]);
    let date = Local::now().format("%Y.%m.%d");

    let mut pgn = String::new();
    pgn.push_str(&format!("[Event \"Chessbots Match {tag}\"]\n"));
    pgn.push_str("[Site \"?\"]\n");
    pgn.push_str(&format!("[Date \"{date}\"]\n"));
    pgn.push_str("[Round \"1\"]\n");
    pgn.push_str(&format!("[White \"{white}\"]\n"));
    pgn.push_str(&format!("[Black \"{black}\"]\n"));
    pgn.push_str(&format!("[Result \"{}\"]\n", result_token(outcome)));
    pgn.push('\n');
    pgn.push_str(&movetext);
    pgn.push('\n');
    Ok(pgn)
}

/// Render and write the record to `path`.
pub fn write(
    path: &Path,
    moves: &[Move],
    white: &str,
    black: &str,
    outcome: Option<&Outcome>,
) -> anyhow::Result<()> {
    let pgn = render(moves, white, black, outcome)?;
    std::fs::write(path, pgn)
        .with_context(|| format!("failed to write PGN to {}", path.display()))?;
    Ok(())
}

fn movetext(moves: &[Move], outcome: Option<&Outcome>) -> Result<String, IllegalMoveError> {
    let mut board = Board::startpos();
    let mut tokens = Vec::with_capacity(moves.len() + 1);
    for (ply, &mv) in moves.iter().enumerate() {
        let san = san::to_san(&board, mv)?;
        if ply % 2 == 0 {
            tokens.push(format!("{}. {san}", ply / 2 + 1));
        } else {
            tokens.push(san);
        }
        board.try_push(mv)?;
    }
    tokens.push(result_token(outcome).to_string());
    Ok(tokens.join(" "))
}

fn result_token(outcome: Option<&Outcome>) -> &'static str {
    outcome.map(Outcome::result_token).unwrap_or("*")
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
