use serde::{Deserialize, Serialize};

use super::types::Direction;

pub const DEFAULT_GRID_SIZE: usize = 20;

/// A grid position. Coordinates are signed so that a candidate head one step
/// past the wall can be represented and then rejected by [`Grid::in_bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.vector();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Square playing field of `size` x `size` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn area(&self) -> usize {
        self.size * self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        let n = self.size as i64;
        (0..n).contains(&(cell.x as i64)) && (0..n).contains(&(cell.y as i64))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
