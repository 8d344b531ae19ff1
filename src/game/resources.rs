//! Game resources (singleton state).

use bevy::prelude::*;

use super::{ConfigError, ConfigField, MAX_FIELD_DIGITS, MIN_FIELD_CELLS, SessionConfig, SpeedTier};

/// Game phase enum to track which screen the shell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Configuring,
    Playing,
    GameOver,
}

/// Shell state shared between the screens.
#[derive(Resource, Debug, Default)]
pub struct GameState {
    pub phase: GamePhase,
    /// `None` until a session has ended.
    pub final_score: Option<u32>,
    pub config: SessionConfig,
}

impl GameState {
    /// Enters the active screen with `config`, clearing any stale score.
    pub fn begin(&mut self, config: SessionConfig) {
        self.phase = GamePhase::Playing;
        self.final_score = None;
        self.config = config;
    }

    pub fn finish(&mut self, score: u32) {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(score);
    }

    /// Returns to the configuration screen.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Configuring;
        self.final_score = None;
    }
}

/// Editable contents of the configuration screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ConfigForm {
    pub width: String,
    pub height: String,
    pub speed: SpeedTier,
    pub focus: ConfigField,
    pub error: Option<String>,
}

impl Default for ConfigForm {
    fn default() -> Self {
        let config = SessionConfig::default();
        ConfigForm::new(&config.width.to_string(), &config.height.to_string(), config.speed)
    }
}

impl ConfigForm {
    /// Builds a form from free text, keeping at most two characters per field.
    pub fn new(width: &str, height: &str, speed: SpeedTier) -> Self {
        ConfigForm {
            width: width.chars().take(MAX_FIELD_DIGITS).collect(),
            height: height.chars().take(MAX_FIELD_DIGITS).collect(),
            speed,
            focus: ConfigField::default(),
            error: None,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            ConfigField::Width => Some(&mut self.width),
            ConfigField::Height => Some(&mut self.height),
            ConfigField::Speed => None,
        }
    }

    /// Appends a digit to the focused text field. Returns false when rejected.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        match self.focused_text() {
            Some(text) if text.chars().count() < MAX_FIELD_DIGITS => {
                text.push(digit);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn cycle_speed(&mut self, forward: bool) {
        self.speed = if forward {
            self.speed.next()
        } else {
            self.speed.previous()
        };
    }

    /// Validates the form. Sizes below the minimum are clamped up.
    pub fn submit(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig {
            width: parse_cells("width", &self.width)?,
            height: parse_cells("height", &self.height)?,
            speed: self.speed,
        })
    }
}

fn parse_cells(field: &'static str, input: &str) -> Result<u32, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { field });
    }

    let cells: u32 = trimmed.parse().map_err(|_| ConfigError::NotANumber {
        field,
        input: trimmed.to_string(),
    })?;

    if cells < MIN_FIELD_CELLS {
        warn!("{field} of {cells} cells is too small, using {MIN_FIELD_CELLS}");
        return Ok(MIN_FIELD_CELLS);
    }
    Ok(cells)
}
