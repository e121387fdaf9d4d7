//! UI option types shared by the engine and the renderer.
//!
//! Pure data with no ratatui dependency.

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs instead of bulbs and box symbols.
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    pub high_contrast: bool,
    /// Disable the success animation.
    pub reduced_motion: bool,
}
