//! Configuration loading for Bitlights.
//!
//! The `[game]` section deserializes straight into the validated setting
//! types. A value that fails validation is kept as [`Lenient::Invalid`] so one
//! bad key does not discard the file; [`resolve`] logs and skips it.
//! Environment variables are applied after the file.
//!
//! ```toml
//! [game]
//! bits = 6
//! difficulty = "manual"
//! mode = "quiz"
//! show_zero_terms = false
//!
//! [app]
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use bitlights_types::ui::UiOptions;
use bitlights_types::{BitCount, Difficulty, Mode, Settings};

pub const ENV_BITS: &str = "BITLIGHTS_BITS";
pub const ENV_DIFFICULTY: &str = "BITLIGHTS_DIFFICULTY";
pub const ENV_MODE: &str = "BITLIGHTS_MODE";
/// Comma-separated target values; replaces random targets when set.
pub const ENV_TARGETS: &str = "BITLIGHTS_TARGETS";

#[derive(Debug, Default, Deserialize)]
pub struct BitlightsConfig {
    pub app: Option<AppConfig>,
    pub game: Option<GameConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the success animation.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct GameConfig {
    pub bits: Option<Lenient<BitCount>>,
    pub difficulty: Option<Lenient<Difficulty>>,
    pub mode: Option<Lenient<Mode>>,
    pub show_zero_terms: Option<bool>,
}

/// A config value that either validated or is kept raw for reporting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(toml::Value),
}

impl<T: Copy> Lenient<T> {
    /// The validated value; an invalid one is logged under `key` and dropped.
    fn accept(&self, key: &str) -> Option<T> {
        match self {
            Lenient::Valid(value) => Some(*value),
            Lenient::Invalid(raw) => {
                warn!("Ignoring invalid {key} in config: {raw}");
                None
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl BitlightsConfig {
    /// Load `~/.bitlights/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bitlights").join("config.toml"))
}

/// Fully resolved startup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub ui: UiOptions,
    /// Fixed target sequence, if one was requested.
    pub fixed_targets: Option<String>,
}

/// Resolve file config plus environment overrides.
///
/// `env` looks up a variable by name; pass `|key| std::env::var(key).ok()`
/// in production.
pub fn resolve<F>(config: Option<&BitlightsConfig>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = ResolvedConfig::default();

    if let Some(app) = config.and_then(|cfg| cfg.app.as_ref()) {
        resolved.ui = UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
        };
    }

    if let Some(game) = config.and_then(|cfg| cfg.game.as_ref()) {
        if let Some(count) = game.bits.as_ref().and_then(|bits| bits.accept("bits")) {
            resolved.settings.bit_count = count;
        }
        if let Some(difficulty) = game
            .difficulty
            .as_ref()
            .and_then(|difficulty| difficulty.accept("difficulty"))
        {
            resolved.settings.difficulty = difficulty;
        }
        if let Some(mode) = game.mode.as_ref().and_then(|mode| mode.accept("mode")) {
            resolved.settings.mode = mode;
        }
        if let Some(show) = game.show_zero_terms {
            resolved.settings.show_zero_terms = show;
        }
    }

    if let Some(raw) = env(ENV_BITS) {
        match raw.trim().parse::<i64>() {
            Ok(bits) => match BitCount::try_from(bits) {
                Ok(count) => resolved.settings.bit_count = count,
                Err(err) => warn!("Ignoring {ENV_BITS}: {err}"),
            },
            Err(_) => warn!("Ignoring non-numeric {ENV_BITS}: {raw}"),
        }
    }
    if let Some(raw) = env(ENV_DIFFICULTY) {
        match Difficulty::parse(&raw) {
            Some(difficulty) => resolved.settings.difficulty = difficulty,
            None => warn!("Unknown difficulty in {ENV_DIFFICULTY}: {raw}"),
        }
    }
    if let Some(raw) = env(ENV_MODE) {
        match Mode::parse(&raw) {
            Some(mode) => resolved.settings.mode = mode,
            None => warn!("Unknown mode in {ENV_MODE}: {raw}"),
        }
    }
    resolved.fixed_targets = env(ENV_TARGETS).filter(|raw| !raw.trim().is_empty());

    resolved
}
