//! Terminal board rendering for verbose play.

use cozy_chess::{Color, File, Rank, Square};
use crossterm::style::Stylize;

use crate::board::{piece_char, Board};

/// Render the board rank 8 first, with black's pieces shown upper-case on a
/// grey block so the two armies read apart at a glance.
pub fn pretty(board: &Board) -> String {
    let mut out = String::new();
    for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, &file) in File::ALL.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            let square = Square::new(file, rank);
            match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(Color::Black)) => {
                    let glyph = piece_char(piece, Color::White).to_string();
                    out.push_str(&format!("{}", glyph.white().on_dark_grey()));
                }
                (Some(piece), Some(Color::White)) => out.push(piece_char(piece, Color::White)),
                _ => out.push('.'),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_eight_ranks_with_highlighting() {
        let text = pretty(&Board::startpos());
        assert_eq!(text.lines().count(), 8);
        // Black's pieces carry styling escapes; empty squares stay plain.
        assert!(text.contains('\u{1b}'));
        assert!(text.lines().nth(4).unwrap().starts_with(". "));
    }
}
