//! Player variants for the match harness.
//!
//! Everything here implements [`game_core::Player`]:
//! - [`RandomPlayer`] — uniform choice among legal moves, the baseline
//! - [`HeuristicPlayer`] — mate-taking, check-preferring, draw-avoiding bot
//! - [`HumanPlayer`] — interactive stdin input with local re-prompting
//! - [`UciPlayer`] — an external UCI engine subprocess
//!
//! Players are cheap to construct and side-effect-free until used, so a
//! batch can instantiate a fresh pair per game.

pub mod heuristic;
pub mod human;
pub mod random;
pub mod uci;

pub use heuristic::HeuristicPlayer;
pub use human::HumanPlayer;
pub use random::RandomPlayer;
pub use uci::{EngineConfig, UciPlayer};
