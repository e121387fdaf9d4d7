//! End-to-end round behavior driven through `Session::dispatch`.

use std::collections::HashSet;

use bitlights_engine::{
    Action, BitCount, Difficulty, Dispatch, Feedback, IgnoreReason, Mode, Phase, Session,
};

use crate::common::{bits, explore, quiz, session};

/// Toggle the positions whose weights sum to `value`, starting from all-off.
fn light_up(session: &mut Session, value: u16) {
    let n = session.settings().bit_count.len();
    for position in 0..n {
        let weight = 1u16 << (n - 1 - position);
        if value & weight != 0 {
            assert!(session.dispatch(Action::ToggleBit(position)).is_applied());
        }
    }
}

fn target(session: &Session) -> u16 {
    session.snapshot().quiz.unwrap().target.value()
}

#[test]
fn every_pattern_maps_to_a_distinct_value() {
    for count in BitCount::ALL {
        let n = count.get();
        let max = count.max_value();
        let mut seen = HashSet::new();
        for pattern in 0..=max {
            let mut session = session(explore(n), &[]);
            light_up(&mut session, pattern);
            let value = session.snapshot().value;
            assert_eq!(value, pattern, "{n} bits");
            assert!(seen.insert(value));
        }
        assert_eq!(seen.len(), usize::from(max) + 1);
        assert!(seen.contains(&0));
        assert!(seen.contains(&max));
    }
}

#[test]
fn random_targets_stay_in_range_across_rounds() {
    for count in BitCount::ALL {
        let mut session = Session::with_random_targets(quiz(count.get(), Difficulty::Assisted));
        for round in 0..100u32 {
            let goal = target(&session);
            assert!((1..=count.max_value()).contains(&goal), "{goal} out of range");
            light_up(&mut session, goal);
            assert_eq!(session.phase(), Phase::Correct);
            assert!(session.dispatch(Action::Advance).is_applied());
            assert_eq!(session.snapshot().quiz.unwrap().score, round + 1);
        }
    }
}

#[test]
fn toggling_twice_restores_row_and_value() {
    let mut session = session(explore(6), &[]);
    light_up(&mut session, 0b10_1101);
    let before = session.snapshot();
    for position in 0..6 {
        session.dispatch(Action::ToggleBit(position));
        session.dispatch(Action::ToggleBit(position));
        let after = session.snapshot();
        assert_eq!(after.bits, before.bits);
        assert_eq!(after.value, before.value);
    }
}

#[test]
fn assisted_round_succeeds_without_check() {
    let mut session = session(quiz(4, Difficulty::Assisted), &[5]);
    session.dispatch(Action::ToggleBit(1));
    assert_eq!(session.phase(), Phase::Awaiting);
    session.dispatch(Action::ToggleBit(3));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.bits.to_string(), "0101");
    assert_eq!(snapshot.quiz.unwrap().feedback, Feedback::Success);
    assert_eq!(
        session.dispatch(Action::CheckAnswer),
        Dispatch::Ignored(IgnoreReason::CheckOutsideManualQuiz)
    );
}

#[test]
fn manual_round_needs_check_and_recovers_from_error() {
    let mut session = session(quiz(4, Difficulty::Manual), &[9]);
    session.dispatch(Action::ToggleBit(0));
    assert!(session.dispatch(Action::CheckAnswer).is_applied());
    assert_eq!(session.phase(), Phase::Incorrect);
    assert_eq!(session.snapshot().quiz.unwrap().feedback, Feedback::Error);

    session.dispatch(Action::ToggleBit(3));
    assert_eq!(session.phase(), Phase::Awaiting);
    assert_eq!(session.snapshot().bits.to_string(), "1001");

    session.dispatch(Action::CheckAnswer);
    assert_eq!(session.phase(), Phase::Correct);
    assert_eq!(
        session.dispatch(Action::CheckAnswer),
        Dispatch::Ignored(IgnoreReason::AlreadySolved)
    );
}

#[test]
fn advance_scores_and_clears() {
    let mut session = session(quiz(5, Difficulty::Assisted), &[7, 20]);
    light_up(&mut session, 7);
    session.dispatch(Action::Advance);

    let snapshot = session.snapshot();
    let quiz = snapshot.quiz.unwrap();
    assert_eq!(quiz.score, 1);
    assert_eq!(quiz.target.value(), 20);
    assert_eq!(quiz.feedback, Feedback::None);
    assert!(snapshot.bits.is_zero());
    assert_eq!(snapshot.bits.len(), 5);
}

#[test]
fn bit_count_change_mid_quiz_starts_over() {
    let mut session = session(quiz(4, Difficulty::Assisted), &[3, 3, 15, 200]);
    light_up(&mut session, 3);
    session.dispatch(Action::Advance);
    light_up(&mut session, 3);
    session.dispatch(Action::Advance);
    assert_eq!(session.snapshot().quiz.unwrap().score, 2);

    session.dispatch(Action::SetBitCount(bits(8)));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.bits.len(), 8);
    assert!(snapshot.bits.is_zero());
    let quiz = snapshot.quiz.unwrap();
    assert_eq!(quiz.score, 0);
    assert_eq!(quiz.target.value(), 200);
    assert_eq!(snapshot.phase, Phase::Awaiting);
}

#[test]
fn difficulty_change_keeps_target_and_score() {
    let mut session = session(quiz(4, Difficulty::Assisted), &[2, 6]);
    light_up(&mut session, 2);
    session.dispatch(Action::Advance);
    session.dispatch(Action::ToggleBit(0));

    session.dispatch(Action::SetDifficulty(Difficulty::Manual));
    let snapshot = session.snapshot();
    assert!(snapshot.bits.is_zero());
    let quiz = snapshot.quiz.unwrap();
    assert_eq!(quiz.target.value(), 6);
    assert_eq!(quiz.score, 1);
    assert_eq!(quiz.feedback, Feedback::None);
    assert!(quiz.value_hidden);
}

#[test]
fn reselecting_quiz_resets_score() {
    let mut session = session(quiz(4, Difficulty::Assisted), &[1, 2, 3]);
    light_up(&mut session, 1);
    session.dispatch(Action::Advance);
    assert_eq!(session.snapshot().quiz.unwrap().score, 1);

    assert!(session.dispatch(Action::SetMode(Mode::Quiz)).is_applied());
    let quiz = session.snapshot().quiz.unwrap();
    assert_eq!(quiz.score, 0);
    assert_eq!(quiz.target.value(), 3);
}

#[test]
fn explore_decomposition_follows_zero_display() {
    let mut session = session(explore(4), &[]);
    light_up(&mut session, 0b1010);
    session.dispatch(Action::ToggleZeroDisplay);

    let hidden = session.snapshot().terms.unwrap();
    assert_eq!(
        hidden
            .iter()
            .map(|term| (term.weight, term.active))
            .collect::<Vec<_>>(),
        [(8, true), (2, true)]
    );

    session.dispatch(Action::ToggleZeroDisplay);
    let shown = session.snapshot().terms.unwrap();
    assert_eq!(
        shown
            .iter()
            .map(|term| (term.weight, term.active))
            .collect::<Vec<_>>(),
        [(8, true), (4, false), (2, true), (1, false)]
    );
}

#[test]
fn explore_ignores_quiz_only_actions() {
    let mut session = session(explore(4), &[]);
    light_up(&mut session, 6);
    let before = session.snapshot();

    assert!(!session.dispatch(Action::CheckAnswer).is_applied());
    assert!(!session.dispatch(Action::Advance).is_applied());
    assert!(
        session
            .dispatch(Action::SetDifficulty(Difficulty::Manual))
            .is_applied()
    );
    let after = session.snapshot();
    assert_eq!(after.bits, before.bits);
    assert_eq!(after.phase, Phase::Idle);

    assert!(session.dispatch(Action::ResetBits).is_applied());
    assert!(session.snapshot().bits.is_zero());
}
