use super::*;

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

#[test]
fn startpos_has_twenty_moves() {
    let board = Board::startpos();
    assert_eq!(board.legal_moves().len(), 20);
    assert_eq!(board.side_to_move(), Color::White);
    assert!(!board.is_game_over());
}

#[test]
fn push_applies_and_records_moves() {
    let mut board = Board::startpos();
    board.try_push(mv("e2e4")).unwrap();
    board.try_push(mv("e7e5")).unwrap();
    assert_eq!(board.moves(), &[mv("e2e4"), mv("e7e5")]);
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn illegal_push_is_rejected_and_leaves_position_intact() {
    let mut board = Board::startpos();
    let before = board.fen();
    let err = board.try_push(mv("e2e5")).unwrap_err();
    assert_eq!(err.mv, mv("e2e5"));
    assert_eq!(board.fen(), before);
    assert!(board.moves().is_empty());
}

#[test]
fn scholars_mate_is_checkmate_for_white() {
    let board =
        Board::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();
    assert_eq!(
        board.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn fools_mate_reached_by_pushing_moves() {
    let mut board = Board::startpos();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        board.try_push(mv(text)).unwrap();
    }
    assert_eq!(
        board.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn stalemate_is_a_draw() {
    let board = Board::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert_eq!(board.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn lone_bishop_is_insufficient_material() {
    let board = Board::from_fen("8/8/8/2k5/8/8/8/K6b w - - 0 1").unwrap();
    assert_eq!(board.outcome(), Some(Outcome::InsufficientMaterial));
}

#[test]
fn opposite_colored_bishops_are_not_insufficient() {
    // Bishops on h1 (light) and h2 (dark): mating nets still exist.
    let board = Board::from_fen("8/8/8/2k5/8/8/7b/K6b w - - 0 1").unwrap();
    assert_eq!(board.outcome(), None);
}

#[test]
fn knight_shuffle_reaches_fivefold_repetition() {
    let mut board = Board::startpos();
    // Each full shuffle revisits the starting setup once more.
    for _ in 0..4 {
        for text in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            board.try_push(mv(text)).unwrap();
        }
    }
    assert_eq!(board.outcome(), Some(Outcome::FivefoldRepetition));
}

#[test]
fn seventy_five_move_rule_fires_at_150_quiet_plies() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    board.quiet_plies = 149;
    board.try_push(mv("h1h2")).unwrap();
    assert_eq!(board.outcome(), Some(Outcome::SeventyFiveMoves));
}

#[test]
fn quiet_plies_reset_on_pawn_moves_and_captures() {
    let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K2R w - - 11 20").unwrap();
    assert_eq!(board.quiet_plies(), 11);
    board.try_push(mv("h1h2")).unwrap();
    assert_eq!(board.quiet_plies(), 12);
    board.try_push(mv("d5e4")).unwrap();
    assert_eq!(board.quiet_plies(), 0);
}

#[test]
fn lookahead_queries_leave_the_live_position_untouched() {
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 0 1")
            .unwrap();
    let before = board.fen();
    // Bxf7+ is check but not mate; the queen sortie is neither.
    assert!(board.is_check_after(mv("c4f7")).unwrap());
    assert!(!board.is_checkmate_after(mv("c4f7")).unwrap());
    assert!(!board.is_check_after(mv("d1h5")).unwrap());
    assert_eq!(board.fen(), before);
    assert!(board.moves().is_empty());
}

#[test]
fn lookahead_rejects_illegal_moves() {
    let board = Board::startpos();
    assert!(board.is_check_after(mv("e2e5")).is_err());
    assert!(board.position_after(&[mv("e2e4"), mv("e2e4")]).is_err());
}

#[test]
fn checkmate_lookahead_spots_mate_in_one() {
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 1")
            .unwrap();
    assert!(board.is_checkmate_after(mv("h5f7")).unwrap());
    assert!(!board.is_stalemate_after(mv("h5f7")).unwrap());
}

#[test]
fn stalemate_lookahead() {
    let board = Board::from_fen("k7/8/8/1Q6/8/8/8/1K6 w - - 0 1").unwrap();
    assert!(board.is_stalemate_after(mv("b5b6")).unwrap());
    assert!(board.is_draw_after(mv("b5b6")).unwrap());
}

#[test]
fn display_renders_the_starting_grid() {
    let board = Board::startpos();
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "r n b q k b n r");
    assert_eq!(lines[6], "P P P P P P P P");
    assert_eq!(lines[4], ". . . . . . . .");
}

#[test]
fn outcome_display_and_scores() {
    let mate = Outcome::Checkmate {
        winner: Color::Black,
    };
    assert_eq!(mate.to_string(), "BLACK wins by checkmate");
    assert_eq!(mate.scores(), (0.0, 1.0));
    assert_eq!(mate.result_token(), "0-1");
    assert_eq!(Outcome::Stalemate.scores(), (0.5, 0.5));
    assert_eq!(Outcome::Stalemate.result_token(), "1/2-1/2");
    assert!(Outcome::SeventyFiveMoves.is_draw());
}
