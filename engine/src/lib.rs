//! Application state for Bitlights.
//!
//! [`App`] wraps a core [`Session`] with the view-only state a terminal
//! front end needs: a bit cursor, the help overlay, a status line, the
//! success effect, and the quit flag. It has no ratatui dependency.

mod effects;

use std::time::{Duration, Instant};

use tracing::{info, warn};

pub use bitlights_config::{
    BitlightsConfig, ConfigError, ResolvedConfig, config_path, resolve as resolve_config,
};
pub use bitlights_core::{
    Action, Dispatch, IgnoreReason, QuizView, RandomTargets, SequenceTargets, Session, Snapshot,
    TargetSource,
};
pub use bitlights_types::ui::UiOptions;
pub use bitlights_types::{
    BitCount, BitIndex, BitVector, Difficulty, Feedback, Mode, Phase, Settings, Target, Term,
};
pub use effects::{AnimPhase, SUCCESS_EFFECT_DURATION, SuccessEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug)]
pub struct App {
    session: Session,
    ui_options: UiOptions,
    /// Position of the highlighted bit; always inside the current row.
    cursor: usize,
    show_help: bool,
    status: Option<StatusMessage>,
    effect: Option<SuccessEffect>,
    should_quit: bool,
    last_frame: Instant,
}

impl App {
    /// Build the app from resolved configuration.
    #[must_use]
    pub fn new(config: &ResolvedConfig) -> Self {
        let targets: Box<dyn TargetSource> = match config.fixed_targets.as_deref() {
            Some(raw) => match SequenceTargets::parse(raw) {
                Some(sequence) => {
                    info!(targets = raw, "Using fixed target sequence");
                    Box::new(sequence)
                }
                None => {
                    warn!("Ignoring malformed target sequence: {raw}");
                    Box::new(RandomTargets)
                }
            },
            None => Box::new(RandomTargets),
        };
        Self::with_session(Session::new(config.settings, targets), config.ui)
    }

    #[must_use]
    pub fn with_session(session: Session, ui_options: UiOptions) -> Self {
        Self {
            session,
            ui_options,
            cursor: 0,
            show_help: false,
            status: None,
            effect: None,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    /// Fresh snapshot of the session. Derived values are recomputed.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.session.settings()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn success_effect(&self) -> Option<&SuccessEffect> {
        self.effect.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Dispatch an action and update view state around it.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let before = self.session.phase();
        let outcome = self.session.dispatch(action);

        let width = self.session.controller().bits().len();
        self.cursor = self.cursor.min(width.saturating_sub(1));

        match outcome {
            Dispatch::Applied => self.status = None,
            Dispatch::Ignored(IgnoreReason::Unchanged) => {}
            Dispatch::Ignored(reason) => {
                self.status = Some(StatusMessage {
                    kind: StatusKind::Warning,
                    text: capitalize(&reason.to_string()),
                });
            }
        }

        let after = self.session.phase();
        if after == Phase::Correct && before != Phase::Correct {
            self.on_solved();
        } else if after != Phase::Correct {
            self.effect = None;
        }
        outcome
    }

    fn on_solved(&mut self) {
        if let Some(quiz) = self.session.controller().quiz() {
            self.status = Some(StatusMessage {
                kind: StatusKind::Info,
                text: format!("Solved {}! Press Enter for the next round", quiz.target()),
            });
        }
        if !self.ui_options.reduced_motion {
            self.effect = Some(SuccessEffect::new(SUCCESS_EFFECT_DURATION));
        }
    }

    pub fn toggle_bit(&mut self, position: usize) -> Dispatch {
        let outcome = self.dispatch(Action::ToggleBit(position));
        if outcome.is_applied() {
            self.cursor = position;
        }
        outcome
    }

    pub fn toggle_at_cursor(&mut self) -> Dispatch {
        self.dispatch(Action::ToggleBit(self.cursor))
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let last = self.session.controller().bits().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Enter key: advance a solved round, otherwise check.
    pub fn primary_action(&mut self) -> Dispatch {
        if self.phase() == Phase::Correct {
            self.dispatch(Action::Advance)
        } else {
            self.dispatch(Action::CheckAnswer)
        }
    }

    pub fn more_bits(&mut self) -> Dispatch {
        let next = self.settings().bit_count.increment();
        self.dispatch(Action::SetBitCount(next))
    }

    pub fn fewer_bits(&mut self) -> Dispatch {
        let next = self.settings().bit_count.decrement();
        self.dispatch(Action::SetBitCount(next))
    }

    pub fn flip_difficulty(&mut self) -> Dispatch {
        let next = self.settings().difficulty.flipped();
        self.dispatch(Action::SetDifficulty(next))
    }

    pub fn select_mode(&mut self, mode: Mode) -> Dispatch {
        self.dispatch(Action::SetMode(mode))
    }

    pub fn switch_mode(&mut self) -> Dispatch {
        let next = self.settings().mode.other();
        self.dispatch(Action::SetMode(next))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Advance timers by the wall-clock time since the previous frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance_effects(delta);
    }

    pub fn advance_effects(&mut self, delta: Duration) {
        if let Some(effect) = self.effect.as_mut() {
            effect.advance(delta);
            if effect.is_finished() {
                self.effect = None;
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
