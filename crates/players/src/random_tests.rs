use super::*;
use game_core::{Board, ClockPair, Color, TimeSettings};

#[tokio::test]
async fn returns_a_legal_move() {
    let board = Board::startpos();
    let clocks = ClockPair::new(TimeSettings::default());
    let turn = Turn {
        board: &board,
        clocks: &clocks,
        color: Color::White,
    };
    let mut player = RandomPlayer::new();
    let mv = player.find_move(&turn).await.unwrap();
    assert!(board.is_legal(mv));
}
