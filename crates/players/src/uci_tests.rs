use super::*;

#[test]
fn bestmove_lines_are_parsed() {
    assert_eq!(parse_bestmove("bestmove e2e4"), Some("e2e4"));
    assert_eq!(parse_bestmove("bestmove e2e4 ponder e7e5"), Some("e2e4"));
    assert_eq!(parse_bestmove("bestmove a7a8q"), Some("a7a8q"));
    assert_eq!(parse_bestmove("bestmove (none)"), None);
    assert_eq!(parse_bestmove("info depth 12 score cp 34"), None);
    assert_eq!(parse_bestmove(""), None);
}

#[test]
fn config_defaults_and_toml_parsing() {
    let config = EngineConfig::new("/usr/bin/stockfish");
    assert_eq!(config.movetime(), Duration::from_millis(10));
    assert!(config.options.is_empty());

    let parsed: EngineConfig = toml::from_str(
        r#"
        path = "/opt/engines/stockfish"
        movetime_ms = 250

        [options]
        Threads = "1"
        Hash = "64"
        "#,
    )
    .unwrap();
    assert_eq!(parsed.path, PathBuf::from("/opt/engines/stockfish"));
    assert_eq!(parsed.movetime(), Duration::from_millis(250));
    assert_eq!(parsed.options.get("Threads").map(String::as_str), Some("1"));
}

#[test]
fn player_name_comes_from_the_executable() {
    let player = UciPlayer::new(EngineConfig::new("/opt/engines/stockfish"));
    assert_eq!(player.name(), "stockfish");
}
