mod direction_router;
mod food;
mod game_state;
mod grid;
mod session;
mod settings;
mod snake;
mod step;
mod types;

pub use direction_router::{DirectionRouter, KeyAction, direction_for_key, key_action};
pub use food::{FoodSpawnError, FoodSpawner, MAX_RANDOM_ATTEMPTS};
pub use game_state::{
    GameOverEvent, GameSnapshot, INITIAL_DIRECTION, ScoreEligibility, SnakeGame, TickOutcome,
};
pub use grid::{Cell, DEFAULT_GRID_SIZE, Grid};
pub use session::{SnakeCommand, SnakeSession};
pub use settings::{DEFAULT_FOOD_SCORE, DEFAULT_TICK_INTERVAL_MS, MAX_FOOD_SCORE, SnakeSettings};
pub use snake::{INITIAL_SNAKE_LENGTH, Snake};
pub use step::{EngineError, SimulationStep, StepOutcome};
pub use types::{Direction, GameOverCause, GameStatus};
