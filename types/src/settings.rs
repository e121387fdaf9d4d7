//! Game configuration values.
//!
//! These are the learner-facing knobs. Each is a closed enumeration, so a
//! value that exists is a valid one; raw strings are parsed at the config
//! boundary.

use serde::Deserialize;

use crate::BitCount;

/// How answers are evaluated in quiz mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Every toggle is compared against the target automatically.
    #[default]
    #[serde(alias = "easy", alias = "normal")]
    Assisted,
    /// The learner must ask for a check; mismatches are reported.
    #[serde(alias = "pro", alias = "hard")]
    Manual,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assisted => "assisted",
            Self::Manual => "manual",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assisted => "Easy",
            Self::Manual => "Pro",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Assisted => Self::Manual,
            Self::Manual => Self::Assisted,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "assisted" | "easy" | "normal" => Some(Self::Assisted),
            "manual" | "pro" | "hard" => Some(Self::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free manipulation. No target, no score.
    #[default]
    #[serde(alias = "lab")]
    Explore,
    #[serde(alias = "game")]
    Quiz,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explore => "explore",
            Self::Quiz => "quiz",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Explore => "Lab",
            Self::Quiz => "Game",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Explore => Self::Quiz,
            Self::Quiz => Self::Explore,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "explore" | "lab" => Some(Self::Explore),
            "quiz" | "game" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// The full configuration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub bit_count: BitCount,
    pub difficulty: Difficulty,
    pub mode: Mode,
    pub show_zero_terms: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bit_count: BitCount::default(),
            difficulty: Difficulty::default(),
            mode: Mode::default(),
            show_zero_terms: true,
        }
    }
}

impl Settings {
    /// Manual difficulty only changes behavior inside a quiz.
    #[must_use]
    pub fn is_manual_quiz(&self) -> bool {
        self.mode == Mode::Quiz && self.difficulty == Difficulty::Manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let settings = Settings::default();
        assert_eq!(settings.bit_count.get(), 4);
        assert_eq!(settings.difficulty, Difficulty::Assisted);
        assert_eq!(settings.mode, Mode::Explore);
        assert!(settings.show_zero_terms);
        assert!(!settings.is_manual_quiz());
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Manual));
        assert_eq!(Difficulty::parse("normal"), Some(Difficulty::Assisted));
        assert_eq!(Difficulty::parse("expert"), None);
        assert_eq!(Mode::parse("Game"), Some(Mode::Quiz));
        assert_eq!(Mode::parse("lab"), Some(Mode::Explore));
        assert_eq!(Mode::parse(""), None);
    }

    #[test]
    fn deserialize_lowercase_names() {
        let d: Difficulty = serde_json::from_value(serde_json::json!("manual")).unwrap();
        assert_eq!(d, Difficulty::Manual);
        let m: Mode = serde_json::from_value(serde_json::json!("quiz")).unwrap();
        assert_eq!(m, Mode::Quiz);
        assert!(serde_json::from_value::<Mode>(serde_json::json!("Quiz")).is_err());
    }

    #[test]
    fn deserialize_accepts_aliases() {
        let d: Difficulty = serde_json::from_value(serde_json::json!("pro")).unwrap();
        assert_eq!(d, Difficulty::Manual);
        let m: Mode = serde_json::from_value(serde_json::json!("lab")).unwrap();
        assert_eq!(m, Mode::Explore);
    }

    #[test]
    fn flips_are_involutions() {
        assert_eq!(Difficulty::Manual.flipped().flipped(), Difficulty::Manual);
        assert_eq!(Mode::Quiz.other(), Mode::Explore);
        assert_eq!(Mode::Explore.other(), Mode::Quiz);
    }
}
