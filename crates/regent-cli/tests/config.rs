use regent_cli::config::CONFIG_FILE;
use regent_cli::RegentConfig;
use regent_core::{Difficulty, Priorities};

#[test]
fn empty_file_gives_defaults() {
    let config = RegentConfig::parse("").unwrap();
    assert_eq!(config, RegentConfig::default());
    assert_eq!(config.max_turns, 50);
    assert_eq!(config.difficulty, Difficulty::Normal);
    assert!(config.priorities.is_none());
    assert!(!config.json);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = RegentConfig::parse("seed: 7\ndifficulty: deity\n").unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.difficulty, Difficulty::Deity);
    assert_eq!(config.max_turns, RegentConfig::default().max_turns);
}

#[test]
fn priorities_override_fills_missing_weights() {
    let config = RegentConfig::parse(
        "
priorities:
  military: 2.0
  randomize: 0.0
",
    )
    .unwrap();
    let p = config.priorities.unwrap();
    assert_eq!(p.military, 2.0);
    assert_eq!(p.randomize, 0.0);
    assert_eq!(p.economy, Priorities::default().economy);
}

#[test]
fn unknown_difficulty_is_an_error() {
    assert!(RegentConfig::parse("difficulty: impossible").is_err());
}

#[test]
fn load_from_dir_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = RegentConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, RegentConfig::default());
}

#[test]
fn load_from_dir_reads_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "max_turns: 12\njson: true\n").unwrap();

    let config = RegentConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.max_turns, 12);
    assert!(config.json);
}

#[test]
fn load_names_the_file_on_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "seed: [not, a, number]\n").unwrap();

    let err = RegentConfig::load(&path).unwrap_err();
    assert!(format!("{err}").contains(CONFIG_FILE));
}
