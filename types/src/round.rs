//! Quiz round vocabulary: targets, feedback, and the derived phase.

use std::fmt;

use thiserror::Error;

use crate::BitCount;

/// A quiz target for a given bit count.
///
/// Invariant: `1 <= value <= count.max_value()`. A zero target would be
/// satisfied by the cleared vector every round starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    value: u16,
    count: BitCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target {value} is outside 1..={max} for {count} bits")]
pub struct TargetError {
    pub value: u16,
    pub max: u16,
    pub count: BitCount,
}

impl Target {
    pub fn new(value: u16, count: BitCount) -> Result<Self, TargetError> {
        if value == 0 || value > count.max_value() {
            return Err(TargetError {
                value,
                max: count.max_value(),
                count,
            });
        }
        Ok(Self { value, count })
    }

    /// Fold an arbitrary number into the valid range `1..=2^N-1`.
    #[must_use]
    pub fn wrapping(raw: u64, count: BitCount) -> Self {
        let span = u64::from(count.max_value());
        let value = (raw.saturating_sub(1) % span) + 1;
        Self {
            value: value as u16,
            count,
        }
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    #[must_use]
    pub const fn count(self) -> BitCount {
        self.count
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Result of the most recent evaluation. Cleared by the next edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Success,
    Error,
}

impl Feedback {
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Where the round state machine currently sits.
///
/// Derived from mode and feedback; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Explore mode: no target, no scoring.
    Idle,
    /// Quiz round open, nothing evaluated yet.
    Awaiting,
    /// The bits match the target; advancing is possible.
    Correct,
    /// A manual check failed. Any edit returns to `Awaiting`.
    Incorrect,
}

impl Phase {
    #[must_use]
    pub const fn from_feedback(feedback: Feedback) -> Self {
        match feedback {
            Feedback::None => Self::Awaiting,
            Feedback::Success => Self::Correct,
            Feedback::Error => Self::Incorrect,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Awaiting => "awaiting",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}
