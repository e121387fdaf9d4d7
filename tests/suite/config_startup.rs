//! Startup path: config file plus environment into a running `App`.

use std::collections::HashMap;
use std::fs;

use bitlights_engine::{App, BitlightsConfig, ConfigError, Difficulty, Mode, Phase, resolve_config};
use tempfile::tempdir;

fn write_config(body: &str) -> (tempfile::TempDir, BitlightsConfig) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    let config = BitlightsConfig::load_from(&path).unwrap().unwrap();
    (dir, config)
}

#[test]
fn file_settings_shape_the_first_round() {
    let (_dir, config) = write_config(
        r#"
        [game]
        bits = 7
        difficulty = "manual"
        mode = "quiz"

        [app]
        reduced_motion = true
        "#,
    );
    let env: HashMap<&str, &str> = [("BITLIGHTS_TARGETS", "100")].into_iter().collect();
    let resolved = resolve_config(Some(&config), |key| {
        env.get(key).map(|value| (*value).to_string())
    });
    let app = App::new(&resolved);

    let snapshot = app.snapshot();
    assert_eq!(snapshot.bits.len(), 7);
    assert_eq!(snapshot.settings.difficulty, Difficulty::Manual);
    assert_eq!(snapshot.phase, Phase::Awaiting);
    let quiz = snapshot.quiz.unwrap();
    assert_eq!(quiz.target.value(), 100);
    assert!(quiz.value_hidden);
    assert!(app.ui_options().reduced_motion);
}

#[test]
fn env_wins_over_file() {
    let (_dir, config) = write_config("[game]\nbits = 5\nmode = \"quiz\"\n");
    let resolved = resolve_config(Some(&config), |key| match key {
        "BITLIGHTS_BITS" => Some("6".to_string()),
        "BITLIGHTS_MODE" => Some("lab".to_string()),
        _ => None,
    });
    let app = App::new(&resolved);
    assert_eq!(app.settings().bit_count.get(), 6);
    assert_eq!(app.settings().mode, Mode::Explore);
    assert!(app.snapshot().quiz.is_none());
}

#[test]
fn fixed_targets_wrap_into_range() {
    let resolved = resolve_config(None, |key| {
        (key == "BITLIGHTS_TARGETS").then(|| "30, 0".to_string())
    });
    let mut app = App::new(&resolved);
    app.select_mode(Mode::Quiz);
    assert_eq!(app.snapshot().quiz.unwrap().target.value(), 15);
    app.select_mode(Mode::Quiz);
    assert_eq!(app.snapshot().quiz.unwrap().target.value(), 1);
}

#[test]
fn broken_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[game]\nbits = \"many").unwrap();
    let err = BitlightsConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
    assert!(err.to_string().contains("config.toml"));
}
