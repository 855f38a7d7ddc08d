use super::*;
use crate::TimeSettings;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn settings(initial_secs: u64, increment_secs: u64) -> TimeSettings {
    TimeSettings::new(
        Duration::from_secs(initial_secs),
        Duration::from_secs(increment_secs),
    )
}

#[derive(Default)]
struct Probe {
    initialized: AtomicUsize,
    closed: AtomicUsize,
}

/// Plays a fixed move script, optionally burning think time per move.
struct Scripted {
    moves: VecDeque<Move>,
    think: Duration,
    probe: Option<Arc<Probe>>,
}

impl Scripted {
    fn new(moves: &[&str]) -> Self {
        Self {
            moves: moves.iter().map(|m| m.parse().unwrap()).collect(),
            think: Duration::ZERO,
            probe: None,
        }
    }

    fn thinking(mut self, think: Duration) -> Self {
        self.think = think;
        self
    }

    fn probed(mut self, probe: Arc<Probe>) -> Self {
        self.probe = Some(probe);
        self
    }
}

#[async_trait]
impl Player for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn initialize(&mut self) -> anyhow::Result<()> {
        if let Some(probe) = &self.probe {
            probe.initialized.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn find_move(&mut self, _turn: &Turn<'_>) -> anyhow::Result<Move> {
        if !self.think.is_zero() {
            tokio::time::sleep(self.think).await;
        }
        self.moves
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if let Some(probe) = &self.probe {
            probe.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

fn fools_mate_players() -> (Box<dyn Player>, Box<dyn Player>) {
    (
        Box::new(Scripted::new(&["f2f3", "g2g4"])),
        Box::new(Scripted::new(&["e7e5", "d8h4"])),
    )
}

#[tokio::test(start_paused = true)]
async fn applied_history_matches_the_script_exactly() {
    let (white, black) = fools_mate_players();
    let report = Game::new(white, black, settings(60, 0)).play().await;

    assert!(matches!(
        report.result,
        Ok(Outcome::Checkmate {
            winner: Color::Black
        })
    ));
    assert_eq!(
        report.moves,
        vec![mv("f2f3"), mv("e7e5"), mv("g2g4"), mv("d8h4")]
    );
    assert_eq!(report.turns_made, 4);
    assert_eq!(report.move_number(), 3);
    assert_eq!(report.verdict_line(), "BLACK wins by checkmate after 3 moves");
}

#[tokio::test(start_paused = true)]
async fn clocks_are_debited_and_credited_per_side() {
    let white = Box::new(
        Scripted::new(&["f2f3", "g2g4"]).thinking(Duration::from_secs(3)),
    );
    let black = Box::new(
        Scripted::new(&["e7e5", "d8h4"]).thinking(Duration::from_secs(1)),
    );
    let report = Game::new(white, black, settings(60, 2)).play().await;

    assert!(report.result.is_ok());
    // Two moves each: 60 - 3 + 2 - 3 + 2 and 60 - 1 + 2 - 1 + 2.
    assert_eq!(report.clocks.remaining(Color::White), Duration::from_secs(58));
    assert_eq!(report.clocks.remaining(Color::Black), Duration::from_secs(62));
}

#[tokio::test(start_paused = true)]
async fn overrunning_the_clock_is_a_timeout_and_applies_no_move() {
    let white = Box::new(
        Scripted::new(&["e2e4"]).thinking(Duration::from_secs(600)),
    );
    let black = Box::new(Scripted::new(&["e7e5"]));
    let report = Game::new(white, black, settings(5, 0)).play().await;

    assert!(matches!(
        report.result,
        Err(GameError::Timeout {
            side: Color::White,
            move_number: 1
        })
    ));
    assert!(report.moves.is_empty());
    assert_eq!(report.verdict_line(), "WHITE loses by timeout on move 1");
    // The timed-out side's clock is not rewritten after the fact.
    assert_eq!(report.clocks.remaining(Color::Black), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn finishing_exactly_on_the_boundary_still_times_out() {
    let white = Box::new(
        Scripted::new(&["e2e4"]).thinking(Duration::from_secs(5)),
    );
    let black = Box::new(Scripted::new(&["e7e5"]));
    let report = Game::new(white, black, settings(5, 2)).play().await;

    assert!(matches!(
        report.result,
        Err(GameError::Timeout {
            side: Color::White,
            ..
        })
    ));
    assert!(report.moves.is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeouts_are_attributed_to_the_side_on_move() {
    let white = Box::new(Scripted::new(&["e2e4"]));
    let black = Box::new(
        Scripted::new(&["e7e5"]).thinking(Duration::from_secs(600)),
    );
    let report = Game::new(white, black, settings(5, 0)).play().await;

    assert!(matches!(
        report.result,
        Err(GameError::Timeout {
            side: Color::Black,
            move_number: 1
        })
    ));
    assert_eq!(report.moves, vec![mv("e2e4")]);
}

#[tokio::test(start_paused = true)]
async fn illegal_moves_abort_without_touching_the_position() {
    let white = Box::new(Scripted::new(&["e2e5"]));
    let black = Box::new(Scripted::new(&["e7e5"]));
    let report = Game::new(white, black, settings(60, 0)).play().await;

    match &report.result {
        Err(GameError::IllegalMove {
            side,
            mv: rejected,
            move_number,
        }) => {
            assert_eq!(*side, Color::White);
            assert_eq!(*rejected, mv("e2e5"));
            assert_eq!(*move_number, 1);
        }
        other => panic!("expected illegal-move abort, got {other:?}"),
    }
    assert!(report.moves.is_empty());
    assert_eq!(report.termination(), "illegal move");
}

#[tokio::test(start_paused = true)]
async fn player_errors_become_faults() {
    // An empty script errors on the first request.
    let white = Box::new(Scripted::new(&[]));
    let black = Box::new(Scripted::new(&["e7e5"]));
    let report = Game::new(white, black, settings(60, 0)).play().await;

    assert!(matches!(
        report.result,
        Err(GameError::PlayerFault {
            side: Color::White,
            move_number: 1,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn games_can_start_from_a_given_position() {
    let board = Board::from_fen("k7/8/8/1Q6/8/8/8/1K6 w - - 0 1").unwrap();
    let white = Box::new(Scripted::new(&["b5b6"]));
    let black = Box::new(Scripted::new(&[]));
    let report = Game::new(white, black, settings(60, 0))
        .with_board(board)
        .play()
        .await;

    assert!(matches!(report.result, Ok(Outcome::Stalemate)));
    assert_eq!(report.turns_made, 1);
    assert_eq!(report.verdict_line(), "Draw by stalemate after 1 moves");
}

#[tokio::test(start_paused = true)]
async fn lifecycle_hooks_bracket_every_exit_path() {
    for script in [
        ("f2f3", "normal"),
        ("e2e5", "illegal"),
        ("sleep", "timeout"),
    ] {
        let white_probe = Arc::new(Probe::default());
        let black_probe = Arc::new(Probe::default());

        let white: Box<dyn Player> = match script.0 {
            "sleep" => Box::new(
                Scripted::new(&["e2e4"])
                    .thinking(Duration::from_secs(600))
                    .probed(white_probe.clone()),
            ),
            first => Box::new(
                Scripted::new(&[first, "g2g4"]).probed(white_probe.clone()),
            ),
        };
        let black: Box<dyn Player> = Box::new(
            Scripted::new(&["e7e5", "d8h4"]).probed(black_probe.clone()),
        );

        let _report = Game::new(white, black, settings(5, 0)).play().await;

        for probe in [&white_probe, &black_probe] {
            assert_eq!(
                probe.initialized.load(Ordering::SeqCst),
                1,
                "initialize once before first use ({})",
                script.1
            );
            assert_eq!(
                probe.closed.load(Ordering::SeqCst),
                1,
                "close exactly once after the loop ({})",
                script.1
            );
        }
    }
}
