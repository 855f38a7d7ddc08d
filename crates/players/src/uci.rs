//! External UCI engine driver.
//!
//! Wraps an engine executable (Stockfish or anything speaking UCI) as a
//! [`Player`]. The conversation is the minimal request/response subset:
//! `uci`/`uciok` and `isready`/`readyok` on startup, then
//! `position fen …` + `go movetime …` answered by `bestmove` per move, and
//! `quit` on close. The process starts lazily on first use; `initialize`
//! and `close` are both idempotent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use game_core::{san, Move, Player, Turn};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// Where the engine lives and how it is asked to think.
///
/// Threaded in explicitly — there is no global engine path. Loadable from a
/// small TOML file:
///
/// ```toml
/// path = "/usr/local/bin/stockfish"
/// movetime_ms = 100
///
/// [options]
/// Threads = "1"
/// Hash = "64"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Engine executable.
    pub path: PathBuf,
    /// Time the engine is told to spend per move, in milliseconds.
    #[serde(default = "default_movetime_ms")]
    pub movetime_ms: u64,
    /// `setoption` pairs sent after the handshake.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Small limit by default, as used for benchmarking bots against engines.
fn default_movetime_ms() -> u64 {
    10
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            movetime_ms: default_movetime_ms(),
            options: BTreeMap::new(),
        }
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid engine config {}", path.display()))
    }

    pub fn movetime(&self) -> Duration {
        Duration::from_millis(self.movetime_ms)
    }
}

struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl EngineProcess {
    async fn send(&mut self, command: &str) -> anyhow::Result<()> {
        debug!(command, "-> engine");
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Drain output until the engine answers with `token`.
    async fn wait_for(&mut self, token: &str) -> anyhow::Result<()> {
        while let Some(line) = self.stdout.next_line().await? {
            if line.trim() == token {
                return Ok(());
            }
        }
        bail!("engine closed its pipe waiting for {token:?}")
    }

    async fn read_bestmove(&mut self) -> anyhow::Result<String> {
        while let Some(line) = self.stdout.next_line().await? {
            debug!(line = line.as_str(), "<- engine");
            if let Some(text) = parse_bestmove(&line) {
                return Ok(text.to_string());
            }
        }
        bail!("engine closed its pipe before sending a bestmove")
    }
}

/// Extract the move token from a `bestmove` line, `None` for anything else
/// (including the `(none)` the engine emits for dead positions).
fn parse_bestmove(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    let text = parts.next()?;
    (text != "(none)").then_some(text)
}

/// A [`Player`] backed by an external UCI engine subprocess.
pub struct UciPlayer {
    name: String,
    config: EngineConfig,
    process: Option<EngineProcess>,
}

impl UciPlayer {
    pub fn new(config: EngineConfig) -> Self {
        let name = config
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "engine".to_string());
        Self {
            name,
            config,
            process: None,
        }
    }

    /// Spawn the process and run the UCI handshake, once.
    async fn ensure_started(&mut self) -> anyhow::Result<&mut EngineProcess> {
        if self.process.is_none() {
            let mut child = Command::new(&self.config.path)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .with_context(|| {
                    format!("failed to start engine {}", self.config.path.display())
                })?;
            let stdin = child.stdin.take().context("engine stdin unavailable")?;
            let stdout = BufReader::new(
                child.stdout.take().context("engine stdout unavailable")?,
            )
            .lines();

            let mut process = EngineProcess {
                child,
                stdin,
                stdout,
            };
            process.send("uci").await?;
            process.wait_for("uciok").await?;
            for (name, value) in &self.config.options {
                process
                    .send(&format!("setoption name {name} value {value}"))
                    .await?;
            }
            process.send("isready").await?;
            process.wait_for("readyok").await?;
            self.process = Some(process);
        }
        self.process
            .as_mut()
            .ok_or_else(|| anyhow!("engine process missing after startup"))
    }
}

#[async_trait]
impl Player for UciPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&mut self) -> anyhow::Result<()> {
        self.ensure_started().await.map(|_| ())
    }

    async fn find_move(&mut self, turn: &Turn<'_>) -> anyhow::Result<Move> {
        let fen = turn.board.fen();
        let movetime = self.config.movetime().as_millis();

        let process = self.ensure_started().await?;
        process.send(&format!("position fen {fen}")).await?;
        process.send(&format!("go movetime {movetime}")).await?;
        let text = process.read_bestmove().await?;

        match san::from_uci(turn.board, &text) {
            Some(mv) => Ok(mv),
            // Let the loop's own validation classify a move we cannot map.
            None => text
                .parse::<Move>()
                .map_err(|_| anyhow!("engine returned malformed move {text:?}")),
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if let Some(mut process) = self.process.take() {
            let _ = process.send("quit").await;
            if tokio::time::timeout(Duration::from_secs(2), process.child.wait())
                .await
                .is_err()
            {
                let _ = process.child.start_kill();
                let _ = process.child.wait().await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
