//! Shared test utilities and fixtures
//!
//! Builders for sessions and apps with pinned target sequences.

#![allow(dead_code)]

use bitlights_engine::{
    App, BitCount, Difficulty, Mode, SequenceTargets, Session, Settings, UiOptions,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

pub fn bits(n: u8) -> BitCount {
    BitCount::new(n).unwrap()
}

pub fn explore(n: u8) -> Settings {
    Settings {
        bit_count: bits(n),
        ..Settings::default()
    }
}

pub fn quiz(n: u8, difficulty: Difficulty) -> Settings {
    Settings {
        bit_count: bits(n),
        difficulty,
        mode: Mode::Quiz,
        ..Settings::default()
    }
}

/// Session whose targets replay `targets` in order.
pub fn session(settings: Settings, targets: &[u64]) -> Session {
    Session::new(settings, Box::new(SequenceTargets::new(targets.to_vec())))
}

pub fn app(settings: Settings, targets: &[u64]) -> App {
    app_with_ui(settings, targets, UiOptions::default())
}

pub fn app_with_ui(settings: Settings, targets: &[u64], ui: UiOptions) -> App {
    App::with_session(session(settings, targets), ui)
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Feed a string of plain characters as key presses.
pub fn type_chars(app: &mut App, keys: &str) {
    for c in keys.chars() {
        bitlights_tui::apply_event(app, &key(KeyCode::Char(c)));
    }
}
