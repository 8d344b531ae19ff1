//! Rendering plugin - redraws the board, food, and snake from the session state every frame.

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_vector_shapes::prelude::*;

use crate::game::{
    BoardSize, CELL_SIZE, Cell, FIELD_COLOR, FOOD_COLOR, GRID_COLOR, GRID_LINE_WIDTH,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, SNAKE_COLOR, WINDOW_MARGIN, Z_FIELD, Z_LAYER_STEP,
};
use crate::snake::{Session, SessionState};

/// Plugin for drawing the running session.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                fit_window_to_board.run_if(resource_added::<Session>),
                draw_session,
            )
                .chain()
                .run_if(resource_exists::<Session>),
        );
    }
}

/// 2D drawing target in board pixels, origin top-left, y pointing down.
pub trait Surface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);
}

/// Draws one full frame: field and grid, then food, then every snake segment.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, board: BoardSize, state: &SessionState) {
    let width = board.width as f32;
    let height = board.height as f32;

    surface.fill_rect(Vec2::ZERO, Vec2::new(width, height), FIELD_COLOR);

    for x in (CELL_SIZE..board.width).step_by(CELL_SIZE as usize) {
        let x = x as f32;
        surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, height), GRID_COLOR);
    }
    for y in (0..board.height).step_by(CELL_SIZE as usize) {
        let y = y as f32;
        surface.stroke_line(Vec2::new(0.0, y), Vec2::new(width, y), GRID_COLOR);
    }

    if let Some(food) = state.food {
        fill_cell(surface, food, FOOD_COLOR);
    }
    for part in &state.snake {
        fill_cell(surface, *part, SNAKE_COLOR);
    }
}

fn fill_cell<S: Surface + ?Sized>(surface: &mut S, cell: Cell, color: Color) {
    let size = CELL_SIZE as f32;
    surface.fill_rect(
        Vec2::new(cell.x as f32, cell.y as f32),
        Vec2::splat(size),
        color,
    );
}

/// [`Surface`] over an immediate-mode shape painter, centered on the world origin.
pub struct PainterSurface<'p, 'w, 's> {
    painter: &'p mut ShapePainter<'w, 's>,
    board: BoardSize,
    z: f32,
}

impl<'p, 'w, 's> PainterSurface<'p, 'w, 's> {
    pub fn new(painter: &'p mut ShapePainter<'w, 's>, board: BoardSize) -> Self {
        PainterSurface {
            painter,
            board,
            z: Z_FIELD,
        }
    }

    fn to_world(&self, point: Vec2) -> Vec3 {
        Vec3::new(
            point.x - self.board.width as f32 / 2.0,
            self.board.height as f32 / 2.0 - point.y,
            self.z,
        )
    }

    // Later primitives stack above earlier ones.
    fn next_layer(&mut self) {
        self.z += Z_LAYER_STEP;
    }
}

impl Surface for PainterSurface<'_, '_, '_> {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.next_layer();
        let center = self.to_world(origin + size / 2.0);
        self.painter.hollow = false;
        self.painter.color = color;
        self.painter.set_translation(center);
        self.painter.rect(size);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.next_layer();
        let start = self.to_world(from);
        let end = self.to_world(to);
        self.painter.color = color;
        self.painter.thickness = GRID_LINE_WIDTH;
        self.painter.set_translation(Vec3::ZERO);
        self.painter.line(start, end);
    }
}

/// System to redraw the current session state.
fn draw_session(mut painter: ShapePainter, session: Res<Session>) {
    let Some(state) = session.state() else {
        return;
    };
    let board = session.config().board();
    let mut surface = PainterSurface::new(&mut painter, board);
    draw_frame(&mut surface, board, state);
}

/// System to size the window to the board when a session begins.
fn fit_window_to_board(session: Res<Session>, mut window: Single<&mut Window, With<PrimaryWindow>>) {
    let board = session.config().board();
    let width = (board.width as u32 + WINDOW_MARGIN).max(MIN_WINDOW_WIDTH);
    let height = (board.height as u32 + WINDOW_MARGIN).max(MIN_WINDOW_HEIGHT);
    window.resolution.set(width as f32, height as f32);
}
