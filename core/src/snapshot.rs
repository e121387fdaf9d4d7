//! Read-only view of a session, rebuilt after every action.

use bitlights_types::{BitVector, Difficulty, Feedback, Phase, Settings, Target, Term};

use crate::controller::RoundController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub target: Target,
    pub score: u32,
    pub feedback: Feedback,
    /// Assisted quiz only: the running value already exceeds the target.
    pub overshoot: bool,
    /// Manual quiz hides the running value from the learner.
    pub value_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub settings: Settings,
    pub bits: BitVector,
    pub value: u16,
    pub phase: Phase,
    /// Present only in quiz mode.
    pub quiz: Option<QuizView>,
    /// Present only in explore mode, filtered by `show_zero_terms`.
    pub terms: Option<Vec<Term>>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(settings: &Settings, controller: &RoundController) -> Self {
        let bits = controller.bits().clone();
        let value = bits.value();

        let quiz = controller.quiz().map(|quiz| {
            let assisted = settings.difficulty == Difficulty::Assisted;
            QuizView {
                target: quiz.target(),
                score: quiz.score(),
                feedback: quiz.feedback(),
                overshoot: assisted && value > quiz.target().value(),
                value_hidden: !assisted,
            }
        });
        let terms = quiz
            .is_none()
            .then(|| bits.terms(settings.show_zero_terms));

        Self {
            settings: *settings,
            bits,
            value,
            phase: controller.phase(),
            quiz,
            terms,
        }
    }
}
