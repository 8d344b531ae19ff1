//! Food placement on free board cells.

use bevy::prelude::*;
use rand::prelude::*;

use crate::game::{BoardSize, Cell, MAX_FOOD_ATTEMPTS, random_coordinate, same_position};

/// Picks a random cell not covered by `snake`, or `None` when the board is full.
///
/// Random draws are tried first; after `MAX_FOOD_ATTEMPTS` misses the free
/// cells are collected and one of them is chosen uniformly.
pub fn place_food<'a, R, I>(rng: &mut R, board: BoardSize, snake: I) -> Option<Cell>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Cell>,
    I::IntoIter: Clone,
{
    if board.columns() <= 0 || board.rows() <= 0 {
        return None;
    }

    let snake = snake.into_iter();
    let occupied = |cell: &Cell| snake.clone().any(|part| same_position(part, cell));

    for _ in 0..MAX_FOOD_ATTEMPTS {
        let position = Cell::new(
            random_coordinate(rng, board.columns()),
            random_coordinate(rng, board.rows()),
        );
        if !occupied(&position) {
            return Some(position);
        }
    }

    let free: Vec<Cell> = board.cells().filter(|cell| !occupied(cell)).collect();
    debug!(
        "food placement fell back to scanning, {} free cells",
        free.len()
    );
    free.choose(rng).copied()
}
