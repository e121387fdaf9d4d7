//! Core state machine for Bitlights.
//!
//! This crate owns the configuration store, the round controller, and the
//! session that drives both. It has no terminal or IO dependencies; the
//! engine and TUI layers observe it through [`Snapshot`]s.

mod controller;
mod session;
mod snapshot;
mod store;
mod target;

pub use controller::{IgnoreReason, QuizRound, Round, RoundController};
pub use session::{Action, Dispatch, Session};
pub use snapshot::{QuizView, Snapshot};
pub use store::{ConfigChange, ConfigStore};
pub use target::{RandomTargets, SequenceTargets, TargetSource};
