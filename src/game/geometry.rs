//! Grid geometry: random coordinates, position equality, and wraparound movement.

use rand::Rng;

use super::{CELL_SIZE, Cell, Direction};

/// Board dimensions in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoardSize {
    pub width: i32,
    pub height: i32,
}

impl BoardSize {
    /// Board covering `width` x `height` cells.
    pub fn from_cells(width: u32, height: u32) -> Self {
        BoardSize {
            width: width as i32 * CELL_SIZE,
            height: height as i32 * CELL_SIZE,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / CELL_SIZE
    }

    pub fn rows(&self) -> i32 {
        self.height / CELL_SIZE
    }

    /// Every cell on the board, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let columns = self.columns();
        (0..self.rows()).flat_map(move |row| {
            (0..columns).map(move |column| Cell::new(column * CELL_SIZE, row * CELL_SIZE))
        })
    }
}

/// Uniform grid-aligned coordinate in `[0, axis_cells)`, scaled to pixels.
/// An empty axis yields 0.
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, axis_cells: i32) -> i32 {
    if axis_cells <= 0 {
        return 0;
    }
    rng.random_range(0..axis_cells) * CELL_SIZE
}

pub fn same_position(a: &Cell, b: &Cell) -> bool {
    a.x == b.x && a.y == b.y
}

/// Moves `head` one cell in `direction`, wrapping around the board edges.
pub fn next_head_position(head: Cell, direction: Direction, board: BoardSize) -> Cell {
    let Cell { mut x, mut y } = head;

    match direction {
        Direction::Right => x += CELL_SIZE,
        Direction::Left => x -= CELL_SIZE,
        Direction::Up => y -= CELL_SIZE,
        Direction::Down => y += CELL_SIZE,
    }

    if x < 0 {
        x = board.width - CELL_SIZE;
    } else if x > board.width - CELL_SIZE {
        x = 0;
    }

    if y < 0 {
        y = board.height - CELL_SIZE;
    } else if y > board.height - CELL_SIZE {
        y = 0;
    }

    Cell { x, y }
}
