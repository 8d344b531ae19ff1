//! Session configuration: field size, speed tiers, and validation errors.

use std::time::Duration;

use thiserror::Error;

use super::{BoardSize, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Named speed setting selecting the delay between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
    Expert,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 4] = [
        SpeedTier::Slow,
        SpeedTier::Normal,
        SpeedTier::Fast,
        SpeedTier::Expert,
    ];

    /// Delay between two ticks at this speed.
    pub fn interval(&self) -> Duration {
        let millis = match self {
            SpeedTier::Slow => 300,
            SpeedTier::Normal => 200,
            SpeedTier::Fast => 100,
            SpeedTier::Expert => 50,
        };
        Duration::from_millis(millis)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "slow",
            SpeedTier::Normal => "normal",
            SpeedTier::Fast => "fast",
            SpeedTier::Expert => "expert",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Normal => "Normal",
            SpeedTier::Fast => "Fast",
            SpeedTier::Expert => "Expert",
        }
    }

    /// Looks a tier up by name, case-insensitively. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<SpeedTier> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`SpeedTier::from_name`], falling back to [`SpeedTier::Normal`].
    pub fn from_name_or_default(name: &str) -> SpeedTier {
        Self::from_name(name).unwrap_or_default()
    }

    pub fn next(self) -> SpeedTier {
        let index = Self::ALL.iter().position(|tier| *tier == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> SpeedTier {
        let index = Self::ALL.iter().position(|tier| *tier == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Settings fixed for the lifetime of one session. Width and height are in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u32,
    pub height: u32,
    pub speed: SpeedTier,
}

impl SessionConfig {
    pub fn board(&self) -> BoardSize {
        BoardSize::from_cells(self.width, self.height)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed: SpeedTier::Normal,
        }
    }
}

/// Errors raised when the configuration form cannot produce a [`SessionConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be a number, got {input:?}")]
    NotANumber { field: &'static str, input: String },
}
