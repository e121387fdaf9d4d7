//! Round controller: the state machine behind explore and quiz mode.
//!
//! ```text
//!            mode -> Quiz / bit count change
//!   Idle ─────────────────────────────────────► Awaiting ◄──────────┐
//!    ▲                                           │  │  ▲             │
//!    │ mode -> Explore                   match   │  │  │ toggle      │ toggle
//!    │                            (auto/check)   ▼  │  │             │
//!    └──────────────────────────────────────── Correct │       Incorrect
//!                                    advance: score+1, │   (manual check
//!                                    new target ───────┘    mismatch)
//! ```
//!
//! Composite resets build the replacement bits and round first and then
//! assign them together, so no caller can observe a bit vector of one width
//! next to a target drawn for another.

use thiserror::Error;
use tracing::{debug, info};

use bitlights_types::{
    BitCount, BitIndex, BitVector, Difficulty, Feedback, Mode, Phase, Settings, Target,
};

use crate::store::ConfigChange;
use crate::target::TargetSource;

/// Why an action left the state untouched.
///
/// These are not faults; the controller is total over all actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IgnoreReason {
    #[error("bit {position} is outside the {count}-bit row")]
    PositionOutOfRange { position: usize, count: BitCount },
    #[error("checking is only available in a manual quiz")]
    CheckOutsideManualQuiz,
    #[error("this round is already solved")]
    AlreadySolved,
    #[error("solve the round before moving on")]
    AdvanceBeforeSolved,
    #[error("reset is only available in explore mode")]
    ResetInQuiz,
    #[error("setting unchanged")]
    Unchanged,
}

/// Quiz half of the round state. Exists only while in quiz mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRound {
    target: Target,
    score: u32,
    feedback: Feedback,
}

impl QuizRound {
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn feedback(&self) -> Feedback {
        self.feedback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Explore,
    Quiz(QuizRound),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundController {
    bits: BitVector,
    round: Round,
}

impl RoundController {
    /// Start in whatever mode the settings name.
    pub fn new(settings: &Settings, targets: &mut dyn TargetSource) -> Self {
        match settings.mode {
            Mode::Explore => Self::explore(settings.bit_count),
            Mode::Quiz => Self::fresh_quiz(settings.bit_count, 0, targets),
        }
    }

    fn explore(count: BitCount) -> Self {
        Self {
            bits: BitVector::zeroed(count),
            round: Round::Explore,
        }
    }

    fn fresh_quiz(count: BitCount, score: u32, targets: &mut dyn TargetSource) -> Self {
        let target = draw_target(count, targets);
        info!(
            bits = count.get(),
            goal = target.value(),
            score,
            "quiz round started"
        );
        Self {
            bits: BitVector::zeroed(count),
            round: Round::Quiz(QuizRound {
                target,
                score,
                feedback: Feedback::None,
            }),
        }
    }

    #[must_use]
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizRound> {
        match &self.round {
            Round::Explore => None,
            Round::Quiz(quiz) => Some(quiz),
        }
    }

    /// Current decimal value. Recomputed on every call.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.bits.value()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.round {
            Round::Explore => Phase::Idle,
            Round::Quiz(quiz) => Phase::from_feedback(quiz.feedback),
        }
    }

    /// Apply the cascading reset for a configuration change.
    ///
    /// `settings` must already hold the new values.
    pub fn react(
        &mut self,
        change: ConfigChange,
        settings: &Settings,
        targets: &mut dyn TargetSource,
    ) {
        debug!(?change, "round controller reacting to config change");
        let count = settings.bit_count;
        match change {
            ConfigChange::Mode { to: Mode::Quiz, .. } => {
                *self = Self::fresh_quiz(count, 0, targets);
            }
            ConfigChange::Mode {
                to: Mode::Explore, ..
            } => {
                *self = Self::explore(count);
            }
            ConfigChange::BitCount { .. } => {
                *self = match self.round {
                    Round::Quiz(_) => Self::fresh_quiz(count, 0, targets),
                    Round::Explore => Self::explore(count),
                };
            }
            ConfigChange::Difficulty { .. } => {
                if let Round::Quiz(quiz) = self.round {
                    *self = Self {
                        bits: BitVector::zeroed(count),
                        round: Round::Quiz(QuizRound {
                            feedback: Feedback::None,
                            ..quiz
                        }),
                    };
                }
            }
        }
    }

    /// Flip the bit at `position`, clear stale feedback, and auto-evaluate
    /// when assisted.
    pub fn toggle(
        &mut self,
        position: usize,
        settings: &Settings,
    ) -> Result<BitIndex, IgnoreReason> {
        let index = self
            .bits
            .index(position)
            .ok_or(IgnoreReason::PositionOutOfRange {
                position,
                count: self.bits.count(),
            })?;
        self.bits.toggle(index);

        if let Round::Quiz(quiz) = &mut self.round {
            // Any edit restarts evaluation.
            quiz.feedback = Feedback::None;
            if settings.difficulty == Difficulty::Assisted
                && self.bits.value() == quiz.target.value()
            {
                quiz.feedback = Feedback::Success;
                info!(goal = quiz.target.value(), "round solved");
            }
        }
        Ok(index)
    }

    /// Explicit check. Only meaningful in a manual quiz.
    pub fn check(&mut self, settings: &Settings) -> Result<Feedback, IgnoreReason> {
        let Round::Quiz(quiz) = &mut self.round else {
            return Err(IgnoreReason::CheckOutsideManualQuiz);
        };
        if settings.difficulty != Difficulty::Manual {
            return Err(IgnoreReason::CheckOutsideManualQuiz);
        }
        if quiz.feedback == Feedback::Success {
            return Err(IgnoreReason::AlreadySolved);
        }

        let value = self.bits.value();
        quiz.feedback = if value == quiz.target.value() {
            info!(goal = quiz.target.value(), "round solved");
            Feedback::Success
        } else {
            debug!(value, goal = quiz.target.value(), "check failed");
            Feedback::Error
        };
        Ok(quiz.feedback)
    }

    /// Score the solved round and open the next one. Returns the new score.
    pub fn advance(
        &mut self,
        settings: &Settings,
        targets: &mut dyn TargetSource,
    ) -> Result<u32, IgnoreReason> {
        let score = match &self.round {
            Round::Quiz(quiz) if quiz.feedback == Feedback::Success => quiz.score,
            _ => return Err(IgnoreReason::AdvanceBeforeSolved),
        };
        let score = score.saturating_add(1);
        *self = Self::fresh_quiz(settings.bit_count, score, targets);
        Ok(score)
    }

    /// Clear the bits. Explore mode only.
    pub fn reset_bits(&mut self) -> Result<(), IgnoreReason> {
        match self.round {
            Round::Explore => {
                self.bits = BitVector::zeroed(self.bits.count());
                Ok(())
            }
            Round::Quiz(_) => Err(IgnoreReason::ResetInQuiz),
        }
    }
}

fn draw_target(count: BitCount, targets: &mut dyn TargetSource) -> Target {
    let target = targets.next_target(count);
    if target.count() == count {
        return target;
    }
    // A source that answered for another width gets folded into range.
    Target::wrapping(u64::from(target.value()), count)
}
