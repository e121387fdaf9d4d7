//! Core domain types for Bitlights.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod bits;
mod round;
mod settings;
pub mod ui;

pub use bits::{BitCount, BitCountError, BitIndex, BitVector, Term, decimal_value};
pub use round::{Feedback, Phase, Target, TargetError};
pub use settings::{Difficulty, Mode, Settings};
