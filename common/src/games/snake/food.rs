use std::collections::HashSet;
use std::fmt;

use crate::games::SessionRng;
use super::grid::{Cell, Grid};

/// Random draws tried before falling back to picking among enumerated free
/// cells.
pub const MAX_RANDOM_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodSpawnError {
    GridFull { area: usize },
}

impl fmt::Display for FoodSpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodSpawnError::GridFull { area } => {
                write!(f, "No free cell to spawn food on, all {} cells are occupied", area)
            }
        }
    }
}

impl std::error::Error for FoodSpawnError {}

#[derive(Clone, Copy, Debug)]
pub struct FoodSpawner {
    grid: Grid,
}

impl FoodSpawner {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Picks a uniformly random cell not in `occupied`.
    pub fn spawn(&self, occupied: &HashSet<Cell>, rng: &mut SessionRng) -> Result<Cell, FoodSpawnError> {
        let area = self.grid.area();
        let occupied_in_grid = occupied.iter().filter(|c| self.grid.in_bounds(**c)).count();
        if occupied_in_grid >= area {
            return Err(FoodSpawnError::GridFull { area });
        }

        let size = self.grid.size() as i32;
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let cell = Cell::new(rng.random_range(0..size), rng.random_range(0..size));
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        let free: Vec<Cell> = self.grid.cells().filter(|c| !occupied.contains(c)).collect();
        let index = rng.random_range(0..free.len());
        Ok(free[index])
    }
}
