use std::fmt;

use crate::games::SessionRng;
use super::food::{FoodSpawnError, FoodSpawner};
use super::grid::{Cell, Grid};
use super::snake::Snake;
use super::types::{Direction, GameOverCause};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { head: Cell, ate_food: bool },
    /// Terminal tick. On collisions the snake and food are left untouched;
    /// `attempted_head` is where the head would have gone.
    GameOver { cause: GameOverCause, attempted_head: Cell },
}

/// Broken engine invariants. These end the session instead of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    FoodSpawn(FoodSpawnError),
    BodyOverlap { head: Cell, length: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::FoodSpawn(e) => write!(f, "Food spawn failed: {}", e),
            EngineError::BodyOverlap { head, length } => write!(
                f,
                "Snake body overlaps itself after step (head ({}, {}), length {})",
                head.x, head.y, length
            ),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<FoodSpawnError> for EngineError {
    fn from(e: FoodSpawnError) -> Self {
        EngineError::FoodSpawn(e)
    }
}

/// One tick of movement, collision, growth and scoring.
#[derive(Clone, Copy, Debug)]
pub struct SimulationStep {
    grid: Grid,
    spawner: FoodSpawner,
    food_score: u32,
}

impl SimulationStep {
    pub fn new(grid: Grid, food_score: u32) -> Self {
        Self {
            grid,
            spawner: FoodSpawner::new(grid),
            food_score,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn spawner(&self) -> FoodSpawner {
        self.spawner
    }

    pub fn run(
        &self,
        snake: &mut Snake,
        food: &mut Cell,
        score: &mut u32,
        heading: Direction,
        rng: &mut SessionRng,
    ) -> Result<StepOutcome, EngineError> {
        let new_head = snake.head().offset(heading);

        if !self.grid.in_bounds(new_head) {
            return Ok(StepOutcome::GameOver {
                cause: GameOverCause::WallCollision,
                attempted_head: new_head,
            });
        }

        // Checked against the whole pre-step body, tail included, even though
        // the tail would move away this tick.
        if snake.contains(&new_head) {
            return Ok(StepOutcome::GameOver {
                cause: GameOverCause::SelfCollision,
                attempted_head: new_head,
            });
        }

        snake.push_head(new_head);

        let ate_food = new_head == *food;
        if ate_food {
            *score = score.saturating_add(self.food_score);
        } else {
            snake.drop_tail();
        }

        if !snake.is_distinct() {
            return Err(EngineError::BodyOverlap {
                head: new_head,
                length: snake.len(),
            });
        }

        if ate_food {
            if snake.len() >= self.grid.area() {
                return Ok(StepOutcome::GameOver {
                    cause: GameOverCause::GridFilled,
                    attempted_head: new_head,
                });
            }
            *food = self.spawner.spawn(snake.occupied(), rng)?;
        }

        Ok(StepOutcome::Moved {
            head: new_head,
            ate_food,
        })
    }
}
