use std::collections::{HashSet, VecDeque};

use super::grid::{Cell, Grid};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
}

impl Snake {
    /// Starting body: head at the grid centre, tail trailing to the left,
    /// ready to move right.
    pub fn initial(grid: &Grid) -> Self {
        let center = (grid.size() / 2) as i32;
        let cells = (0..INITIAL_SNAKE_LENGTH as i32).map(|i| Cell::new(center - i, center));
        Self::collect(cells)
    }

    /// Builds a snake from head to tail. Fails on an empty or self-overlapping
    /// body.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self, String> {
        let snake = Self::collect(cells);
        if snake.body.is_empty() {
            return Err("Snake must have at least one segment".to_string());
        }
        if !snake.is_distinct() {
            return Err("Snake segments must be distinct".to_string());
        }
        Ok(snake)
    }

    fn collect(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        let body_set = body.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body_set.contains(cell)
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.body_set
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    /// Every segment occupies its own cell.
    pub fn is_distinct(&self) -> bool {
        self.body.len() == self.body_set.len()
    }

    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    pub(super) fn drop_tail(&mut self) {
        if self.body.len() <= 1 {
            return;
        }
        if let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
    }
}

impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl Eq for Snake {}
