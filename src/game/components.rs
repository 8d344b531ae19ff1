//! Board values and ECS marker components for the snake game.

use bevy::prelude::*;

/// Grid-aligned position on the board, in pixels from the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// True for a 90-degree turn away from `self`.
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        *self != other && self.opposite() != other
    }

    /// Maps an arrow key or its WASD equivalent to a direction.
    pub fn from_key(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Component to mark the live score label.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the game over screen.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the configuration screen.
#[derive(Component)]
pub struct MenuUI;

/// Component to mark the text of one configuration field.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldText(pub ConfigField);

/// Component to mark the configuration error line.
#[derive(Component)]
pub struct ConfigErrorText;

/// Editable fields on the configuration screen, in focus order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ConfigField {
    #[default]
    Width,
    Height,
    Speed,
}

impl ConfigField {
    pub fn next(self) -> Self {
        match self {
            ConfigField::Width => ConfigField::Height,
            ConfigField::Height => ConfigField::Speed,
            ConfigField::Speed => ConfigField::Width,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ConfigField::Width => ConfigField::Speed,
            ConfigField::Height => ConfigField::Width,
            ConfigField::Speed => ConfigField::Height,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Width => "Field width (cells number)",
            ConfigField::Height => "Field height (cells number)",
            ConfigField::Speed => "Snake speed (difficulty)",
        }
    }
}
