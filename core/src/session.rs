//! Session: the single entry point that drives configuration and rounds.
//!
//! Every user action goes through [`Session::dispatch`]. Configuration
//! setters run first; the change they report is handed to the round
//! controller before `dispatch` returns, so a snapshot taken afterwards never
//! sees the new settings paired with the old round.

use std::fmt;

use tracing::debug;

use bitlights_types::{BitCount, Difficulty, Mode, Phase, Settings};

use crate::controller::{IgnoreReason, RoundController};
use crate::snapshot::Snapshot;
use crate::store::ConfigStore;
use crate::target::{RandomTargets, TargetSource};

/// Everything a learner can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetBitCount(BitCount),
    SetDifficulty(Difficulty),
    SetMode(Mode),
    /// Raw position, 0 = most significant. Out-of-range positions are ignored.
    ToggleBit(usize),
    CheckAnswer,
    Advance,
    ResetBits,
    ToggleZeroDisplay,
}

/// Outcome of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored(IgnoreReason),
}

impl Dispatch {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl<T> From<Result<T, IgnoreReason>> for Dispatch {
    fn from(result: Result<T, IgnoreReason>) -> Self {
        match result {
            Ok(_) => Self::Applied,
            Err(reason) => Self::Ignored(reason),
        }
    }
}

pub struct Session {
    store: ConfigStore,
    controller: RoundController,
    targets: Box<dyn TargetSource>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(settings: Settings, mut targets: Box<dyn TargetSource>) -> Self {
        let controller = RoundController::new(&settings, targets.as_mut());
        Self {
            store: ConfigStore::new(settings),
            controller,
            targets,
        }
    }

    #[must_use]
    pub fn with_random_targets(settings: Settings) -> Self {
        Self::new(settings, Box::new(RandomTargets))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    #[must_use]
    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.store.settings(), &self.controller)
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        debug!(?action, phase = self.phase().label(), "dispatch");
        let outcome = self.apply(action);
        if let Dispatch::Ignored(reason) = outcome {
            debug!(?action, %reason, "action ignored");
        }
        outcome
    }

    fn apply(&mut self, action: Action) -> Dispatch {
        let change = match action {
            Action::SetBitCount(count) => self.store.set_bit_count(count),
            Action::SetDifficulty(difficulty) => self.store.set_difficulty(difficulty),
            Action::SetMode(mode) => Some(self.store.set_mode(mode)),
            Action::ToggleZeroDisplay => {
                self.store.toggle_zero_terms();
                return Dispatch::Applied;
            }
            Action::ToggleBit(position) => {
                return self.controller.toggle(position, self.store.settings()).into();
            }
            Action::CheckAnswer => return self.controller.check(self.store.settings()).into(),
            Action::Advance => {
                return self
                    .controller
                    .advance(self.store.settings(), self.targets.as_mut())
                    .into();
            }
            Action::ResetBits => return self.controller.reset_bits().into(),
        };

        let Some(change) = change else {
            return Dispatch::Ignored(IgnoreReason::Unchanged);
        };
        self.controller
            .react(change, self.store.settings(), self.targets.as_mut());
        Dispatch::Applied
    }
}
