//! Game constants for board geometry, colors, timing, and configuration limits.

use bevy::prelude::*;

// Board geometry (pixels)
pub const CELL_SIZE: i32 = 20;
pub const GRID_LINE_WIDTH: f32 = 1.0;

// Initial snake
pub const INITIAL_SNAKE_SIZE: usize = 5;

// Configuration defaults and limits (cells)
pub const DEFAULT_WIDTH: u32 = 20;
pub const DEFAULT_HEIGHT: u32 = 20;
pub const MAX_FIELD_DIGITS: usize = 2;
pub const MIN_FIELD_CELLS: u32 = INITIAL_SNAKE_SIZE as u32 + 1;

// Random draws before food placement falls back to scanning for a free cell
pub const MAX_FOOD_ATTEMPTS: usize = 64;

// Colors
pub const FIELD_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const GRID_COLOR: Color = Color::srgb(0.667, 0.667, 0.667);
pub const SNAKE_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
pub const FOOD_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const BACKGROUND_COLOR: Color = Color::srgb(0.58, 0.58, 0.58);

// Window
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const WINDOW_MARGIN: u32 = 80;
pub const CANVAS_SELECTOR: &str = "#snake-canvas";

// Z-index constants for rendering layers
pub const Z_FIELD: f32 = 0.0;
pub const Z_LAYER_STEP: f32 = 0.01;
