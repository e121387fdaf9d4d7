//! Keyboard-driven sessions through the TUI key map and `App`.

use std::time::Duration;

use bitlights_engine::{Difficulty, Mode, Phase, SUCCESS_EFFECT_DURATION, StatusKind, UiOptions};
use bitlights_tui::apply_event;
use crossterm::event::KeyCode;

use crate::common::{app, app_with_ui, explore, key, quiz, type_chars};

#[test]
fn explore_session_from_keys() {
    let mut app = app(explore(4), &[]);
    type_chars(&mut app, "13");
    let snapshot = app.snapshot();
    assert_eq!(snapshot.bits.to_string(), "1010");
    assert_eq!(snapshot.value, 10);

    type_chars(&mut app, "r");
    assert!(app.snapshot().bits.is_zero());
}

#[test]
fn full_game_round_trip() {
    let mut app = app(explore(4), &[5, 12]);
    type_chars(&mut app, "g");
    assert_eq!(app.settings().mode, Mode::Quiz);
    assert_eq!(app.snapshot().quiz.unwrap().target.value(), 5);

    // Assisted: solving needs no check.
    type_chars(&mut app, "24");
    assert_eq!(app.phase(), Phase::Correct);
    assert_eq!(app.status().unwrap().kind, StatusKind::Info);

    apply_event(&mut app, &key(KeyCode::Enter));
    let quiz = app.snapshot().quiz.unwrap();
    assert_eq!(quiz.score, 1);
    assert_eq!(quiz.target.value(), 12);
    assert!(app.snapshot().bits.is_zero());
}

#[test]
fn manual_game_uses_check_key() {
    let mut app = app(quiz(4, Difficulty::Manual), &[9]);
    type_chars(&mut app, "1c");
    assert_eq!(app.phase(), Phase::Incorrect);

    type_chars(&mut app, "4");
    assert_eq!(app.phase(), Phase::Awaiting);
    type_chars(&mut app, "c");
    assert_eq!(app.phase(), Phase::Correct);

    type_chars(&mut app, "n");
    assert_eq!(app.snapshot().quiz.unwrap().score, 1);
}

#[test]
fn next_before_solving_is_reported() {
    let mut app = app(quiz(4, Difficulty::Assisted), &[9]);
    type_chars(&mut app, "n");
    let status = app.status().unwrap();
    assert_eq!(status.kind, StatusKind::Warning);
    assert_eq!(status.text, "Solve the round before moving on");
    assert_eq!(app.snapshot().quiz.unwrap().score, 0);
}

#[test]
fn tab_and_bit_keys_reset_the_round() {
    let mut app = app(explore(4), &[3, 3, 100]);
    apply_event(&mut app, &key(KeyCode::Tab));
    type_chars(&mut app, "34");
    apply_event(&mut app, &key(KeyCode::Enter));
    assert_eq!(app.snapshot().quiz.unwrap().score, 1);

    type_chars(&mut app, "+");
    let snapshot = app.snapshot();
    assert_eq!(snapshot.bits.len(), 5);
    let quiz = snapshot.quiz.unwrap();
    assert_eq!(quiz.score, 0);
    assert_eq!(quiz.target.value(), 7);
}

#[test]
fn cursor_walks_and_clamps() {
    let mut app = app(explore(6), &[]);
    for _ in 0..10 {
        apply_event(&mut app, &key(KeyCode::Right));
    }
    assert_eq!(app.cursor(), 5);
    apply_event(&mut app, &key(KeyCode::Char(' ')));
    assert_eq!(app.snapshot().value, 1);

    type_chars(&mut app, "--");
    assert_eq!(app.settings().bit_count.get(), 4);
    assert_eq!(app.cursor(), 3);
}

#[test]
fn success_effect_runs_and_expires() {
    let mut app = app(quiz(4, Difficulty::Assisted), &[1]);
    type_chars(&mut app, "4");
    assert!(app.success_effect().is_some());
    app.advance_effects(SUCCESS_EFFECT_DURATION / 2);
    assert!(app.success_effect().is_some());
    app.advance_effects(SUCCESS_EFFECT_DURATION);
    assert!(app.success_effect().is_none());
    app.advance_effects(Duration::from_millis(10));
    assert_eq!(app.phase(), Phase::Correct);
}

#[test]
fn reduced_motion_has_no_effect() {
    let ui = UiOptions {
        reduced_motion: true,
        ..UiOptions::default()
    };
    let mut app = app_with_ui(quiz(4, Difficulty::Assisted), &[1], ui);
    type_chars(&mut app, "4");
    assert_eq!(app.phase(), Phase::Correct);
    assert!(app.success_effect().is_none());
}

#[test]
fn help_then_quit() {
    let mut app = app(explore(4), &[]);
    type_chars(&mut app, "?");
    assert!(app.show_help());
    assert!(!apply_event(&mut app, &key(KeyCode::Esc)));
    assert!(!app.show_help());
    assert!(apply_event(&mut app, &key(KeyCode::Esc)));
    assert!(app.should_quit());
}
