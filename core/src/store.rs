//! Configuration store.
//!
//! Setters replace a single field and report what changed as a
//! [`ConfigChange`]. The store never touches round state; the session hands
//! the change to the round controller.

use bitlights_types::{BitCount, Difficulty, Mode, Settings};

/// A configuration change the round controller must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    BitCount { from: BitCount, to: BitCount },
    Difficulty { from: Difficulty, to: Difficulty },
    /// Emitted on every mode selection, including re-selecting the current
    /// mode, which restarts it.
    Mode { from: Mode, to: Mode },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    settings: Settings,
}

impl ConfigStore {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_bit_count(&mut self, count: BitCount) -> Option<ConfigChange> {
        let from = std::mem::replace(&mut self.settings.bit_count, count);
        (from != count).then_some(ConfigChange::BitCount { from, to: count })
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Option<ConfigChange> {
        let from = std::mem::replace(&mut self.settings.difficulty, difficulty);
        (from != difficulty).then_some(ConfigChange::Difficulty {
            from,
            to: difficulty,
        })
    }

    pub fn set_mode(&mut self, mode: Mode) -> ConfigChange {
        let from = std::mem::replace(&mut self.settings.mode, mode);
        ConfigChange::Mode { from, to: mode }
    }

    /// Flip the zero-term display flag. Returns the new value.
    pub fn toggle_zero_terms(&mut self) -> bool {
        self.settings.show_zero_terms = !self.settings.show_zero_terms;
        self.settings.show_zero_terms
    }
}
