//! Chessbots CLI
//!
//! Run automated chess games between interchangeable players — bots, humans
//! and external UCI engines — under a clock with increment, and aggregate
//! batch statistics.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::bail;
use bench::{run_batch, BatchOptions};
use game_core::{display, pgn, Board, Game, Player, TimeSettings};
use players::{EngineConfig, HeuristicPlayer, HumanPlayer, RandomPlayer, UciPlayer};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Chessbots Match Runner");
    println!();
    println!("Usage:");
    println!("  chessbots bench <white> <black> [--games N] [--time SECS] [--increment SECS] [--verbose] [--save PATH]");
    println!("  chessbots play <white> <black> [--time SECS] [--increment SECS] [--quiet] [--pgn PATH] [--no-pgn]");
    println!("  chessbots human <bot> [--white] [--time SECS] [--increment SECS]");
    println!();
    println!("Players:");
    println!("  random            - uniform choice among legal moves");
    println!("  heuristic         - mate-taking, check-preferring bot");
    println!("  human             - interactive stdin input");
    println!("  engine:<path>     - external UCI engine executable");
    println!("  engine:<cfg.toml> - UCI engine described by a TOML config");
    println!();
    println!("Examples:");
    println!("  chessbots bench heuristic random --games 100 --verbose");
    println!("  chessbots play heuristic engine:/usr/bin/stockfish --time 60 --increment 1");
    println!("  chessbots human heuristic --white");
}

/// A parsed player specification, buildable afresh for every game.
enum PlayerKind {
    Random,
    Heuristic,
    Human,
    Engine(EngineConfig),
}

impl PlayerKind {
    fn parse(spec: &str) -> anyhow::Result<Self> {
        match spec.split_once(':') {
            None => match spec {
                "random" => Ok(Self::Random),
                "heuristic" => Ok(Self::Heuristic),
                "human" => Ok(Self::Human),
                other => bail!(
                    "unknown player {other:?} (try random, heuristic, human or engine:<path>)"
                ),
            },
            Some(("engine", target)) => {
                let config = if target.ends_with(".toml") {
                    EngineConfig::from_file(Path::new(target))?
                } else {
                    EngineConfig::new(target)
                };
                Ok(Self::Engine(config))
            }
            Some((kind, _)) => bail!("unknown player kind {kind:?}"),
        }
    }

    fn build(&self) -> Box<dyn Player> {
        match self {
            Self::Random => Box::new(RandomPlayer::new()),
            Self::Heuristic => Box::new(HeuristicPlayer::new()),
            Self::Human => Box::new(HumanPlayer::new()),
            Self::Engine(config) => Box::new(UciPlayer::new(config.clone())),
        }
    }

    fn is_human(&self) -> bool {
        matches!(self, Self::Human)
    }
}

/// Shared `--time`/`--increment` handling; unknown flags are left to the
/// caller's own loop.
fn time_settings(args: &[String]) -> TimeSettings {
    let defaults = TimeSettings::default();
    let mut initial = defaults.initial;
    let mut increment = defaults.increment;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--time" | "-t" => {
                if i + 1 < args.len() {
                    if let Ok(secs) = args[i + 1].parse::<f64>() {
                        initial = Duration::from_secs_f64(secs);
                    }
                    i += 1;
                }
            }
            "--increment" | "-i" => {
                if i + 1 < args.len() {
                    if let Ok(secs) = args[i + 1].parse::<f64>() {
                        increment = Duration::from_secs_f64(secs);
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    TimeSettings::new(initial, increment)
}

async fn cmd_bench(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 2 {
        eprintln!("Error: bench requires two player specifications");
        print_usage();
        return Ok(());
    }
    let white = PlayerKind::parse(&args[0])?;
    let black = PlayerKind::parse(&args[1])?;
    if white.is_human() || black.is_human() {
        bail!("human players cannot run in a batch");
    }

    let mut options = BatchOptions {
        time: time_settings(&args[2..]),
        ..Default::default()
    };
    let mut save: Option<PathBuf> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                if i + 1 < args.len() {
                    options.games = args[i + 1].parse().unwrap_or(options.games);
                    i += 1;
                }
            }
            "--verbose" | "-v" => options.verbose = true,
            "--save" => {
                if i + 1 < args.len() {
                    save = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    println!("=== Match: {} vs {} ===", args[0], args[1]);
    println!("Games: {}", options.games);
    println!();

    let stats = run_batch(|| white.build(), || black.build(), &options).await;

    println!();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!("{}", stats.score_line());

    if let Some(path) = save {
        stats.save(&path)?;
        println!("Stats saved to {}", path.display());
    }
    Ok(())
}

async fn cmd_play(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 2 {
        eprintln!("Error: play requires two player specifications");
        print_usage();
        return Ok(());
    }
    let white = PlayerKind::parse(&args[0])?;
    let black = PlayerKind::parse(&args[1])?;

    let settings = time_settings(&args[2..]);
    let mut quiet = false;
    let mut export = true;
    let mut pgn_path = PathBuf::from("game.pgn");
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--quiet" | "-q" => quiet = true,
            "--no-pgn" => export = false,
            "--pgn" => {
                if i + 1 < args.len() {
                    pgn_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let report = Game::new(white.build(), black.build(), settings)
        .verbose(!quiet)
        .play()
        .await;

    println!();
    println!("{}", report.verdict_line());

    // Only completed games leave a record, like the interactive runner.
    if export {
        if let Ok(outcome) = &report.result {
            pgn::write(
                &pgn_path,
                &report.moves,
                &report.white_name,
                &report.black_name,
                Some(outcome),
            )?;
            println!("PGN written to {}", pgn_path.display());
        }
    }
    Ok(())
}

async fn cmd_human(args: &[String]) -> anyhow::Result<()> {
    if args.is_empty() {
        eprintln!("Error: human requires a bot specification for the other side");
        print_usage();
        return Ok(());
    }
    let bot = PlayerKind::parse(&args[0])?;
    if bot.is_human() {
        bail!("pick a bot for the other side");
    }

    let settings = time_settings(&args[1..]);
    let human_plays_white = args.iter().any(|a| a == "--white");

    println!("{}", display::pretty(&Board::startpos()));

    let (white, black): (Box<dyn Player>, Box<dyn Player>) = if human_plays_white {
        (Box::new(HumanPlayer::new()), bot.build())
    } else {
        (bot.build(), Box::new(HumanPlayer::new()))
    };

    let report = Game::new(white, black, settings).verbose(true).play().await;

    println!();
    println!("{}", report.verdict_line());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "bench" => cmd_bench(&args[2..]).await,
        "play" => cmd_play(&args[2..]).await,
        "human" => cmd_human(&args[2..]).await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            Ok(())
        }
    }
}
