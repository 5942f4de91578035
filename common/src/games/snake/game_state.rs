use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::{PlayerName, log};
use super::direction_router::{DirectionRouter, KeyAction, key_action};
use super::grid::Cell;
use super::settings::SnakeSettings;
use super::snake::Snake;
use super::step::{EngineError, SimulationStep, StepOutcome};
use super::types::{Direction, GameOverCause, GameStatus};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Read-only view of one tick, handed to whoever draws the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
}

/// Emitted once when a game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverEvent {
    pub final_score: u32,
    pub cause: GameOverCause,
}

/// What the UI has to do with the final score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreEligibility {
    NotFinished,
    ReadyToSubmit { identity: PlayerName, score: u32 },
    IdentityRequired { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Skipped,
    Advanced { ate_food: bool },
    GameOver(GameOverEvent),
}

pub struct SnakeGame {
    settings: SnakeSettings,
    step: SimulationStep,
    rng: SessionRng,
    router: DirectionRouter,
    snake: Snake,
    food: Cell,
    heading: Direction,
    score: u32,
    status: GameStatus,
    game_over: Option<GameOverEvent>,
    known_identity: Option<PlayerName>,
}

impl SnakeGame {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Self {
        let grid = settings.grid();
        let placeholder = (grid.size() * 3 / 4) as i32;
        Self {
            step: SimulationStep::new(grid, settings.food_score),
            snake: Snake::initial(&grid),
            food: Cell::new(placeholder, placeholder),
            settings,
            rng,
            router: DirectionRouter::new(),
            heading: INITIAL_DIRECTION,
            score: 0,
            status: GameStatus::Idle,
            game_over: None,
            known_identity: None,
        }
    }

    /// A game already in progress from an arbitrary position.
    pub fn running_with(
        settings: SnakeSettings,
        rng: SessionRng,
        snake: Snake,
        food: Cell,
        heading: Direction,
    ) -> Result<Self, String> {
        let grid = settings.grid();
        if let Some(cell) = snake.cells().find(|c| !grid.in_bounds(**c)) {
            return Err(format!("Snake cell ({}, {}) is outside the grid", cell.x, cell.y));
        }
        if !grid.in_bounds(food) || snake.contains(&food) {
            return Err("Food must be on a free cell inside the grid".to_string());
        }

        let mut game = Self::new(settings, rng);
        game.snake = snake;
        game.food = food;
        game.heading = heading;
        game.status = GameStatus::Running;
        Ok(game)
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.router.pending()
    }

    pub fn game_over_event(&self) -> Option<GameOverEvent> {
        self.game_over
    }

    pub fn set_known_identity(&mut self, identity: Option<PlayerName>) {
        self.known_identity = identity;
    }

    /// Idle/GameOver -> Running with a fresh snake, food, score and heading.
    pub fn start(&mut self) -> Result<bool, EngineError> {
        if !self.router.request_start(self.status) {
            return Ok(false);
        }

        let grid = self.step.grid();
        self.snake = Snake::initial(&grid);
        self.heading = INITIAL_DIRECTION;
        self.score = 0;
        self.router.clear();
        self.game_over = None;
        self.food = self.step.spawner().spawn(self.snake.occupied(), &mut self.rng)?;
        self.status = GameStatus::Running;

        log!(
            "Snake game started on {}x{} grid, food at ({}, {})",
            grid.size(),
            grid.size(),
            self.food.x,
            self.food.y
        );
        Ok(true)
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.router.request_pause_toggle(self.status) {
            return false;
        }
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            _ => GameStatus::Running,
        };
        true
    }

    /// Buffers a heading for the next tick. Ignored unless a game is running
    /// or paused.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return false;
        }
        self.router.request(direction, self.heading, self.snake.len())
    }

    pub fn on_direction_key(&mut self, symbol: &str) -> bool {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return false;
        }
        self.router
            .request_direction(symbol, self.heading, self.snake.len())
            .is_some()
    }

    pub fn on_pause_key(&mut self) -> bool {
        self.toggle_pause()
    }

    pub fn on_start_key(&mut self) -> Result<bool, EngineError> {
        self.start()
    }

    /// Dispatches a raw key symbol. Unknown symbols are ignored.
    pub fn on_key(&mut self, symbol: &str) -> Result<bool, EngineError> {
        match key_action(symbol) {
            Some(KeyAction::Turn(direction)) => Ok(self.request_direction(direction)),
            Some(KeyAction::Start) => self.start(),
            Some(KeyAction::StartOrPause) => {
                if self.router.request_start(self.status) {
                    self.start()
                } else {
                    Ok(self.toggle_pause())
                }
            }
            None => Ok(false),
        }
    }

    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.status != GameStatus::Running {
            return Ok(TickOutcome::Skipped);
        }

        if let Some(direction) = self.router.take_pending() {
            self.heading = direction;
        }

        let outcome = self.step.run(
            &mut self.snake,
            &mut self.food,
            &mut self.score,
            self.heading,
            &mut self.rng,
        )?;

        match outcome {
            StepOutcome::Moved { ate_food, .. } => {
                if ate_food {
                    log!(
                        "Food eaten, score {}, new food at ({}, {})",
                        self.score,
                        self.food.x,
                        self.food.y
                    );
                }
                Ok(TickOutcome::Advanced { ate_food })
            }
            StepOutcome::GameOver { cause, attempted_head } => {
                let event = GameOverEvent {
                    final_score: self.score,
                    cause,
                };
                self.status = GameStatus::GameOver;
                self.game_over = Some(event);
                log!(
                    "Game over ({}) at ({}, {}), final score {}",
                    cause,
                    attempted_head.x,
                    attempted_head.y,
                    self.score
                );
                Ok(TickOutcome::GameOver(event))
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.to_vec(),
            food: self.food,
            direction: self.heading,
            score: self.score,
            status: self.status,
        }
    }

    pub fn score_eligibility(&self) -> ScoreEligibility {
        let Some(event) = self.game_over else {
            return ScoreEligibility::NotFinished;
        };
        match &self.known_identity {
            Some(identity) => ScoreEligibility::ReadyToSubmit {
                identity: identity.clone(),
                score: event.final_score,
            },
            None => ScoreEligibility::IdentityRequired {
                score: event.final_score,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    fn running_game(snake: &[(i32, i32)], food: (i32, i32), heading: Direction) -> SnakeGame {
        SnakeGame::running_with(
            SnakeSettings::default(),
            SessionRng::new(42),
            Snake::from_cells(cells(snake)).unwrap(),
            Cell::new(food.0, food.1),
            heading,
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_is_idle_and_ticks_are_noops() {
        let mut game = SnakeGame::new(SnakeSettings::default(), SessionRng::new(1));
        let before = game.snapshot();
        assert_eq!(before.status, GameStatus::Idle);
        assert_eq!(before.snake, cells(&[(10, 10), (9, 10), (8, 10)]));
        assert_eq!(before.food, Cell::new(15, 15));

        assert_eq!(game.tick().unwrap(), TickOutcome::Skipped);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_start_resets_and_spawns_food_off_snake() {
        let mut game = SnakeGame::new(SnakeSettings::default(), SessionRng::new(1));
        assert!(game.start().unwrap());
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.heading(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert!(!game.snake().contains(&game.food()));
        assert!(!game.start().unwrap());
    }

    #[test]
    fn test_scenario_a_eating() {
        let mut game = running_game(&[(10, 10), (9, 10), (8, 10)], (11, 10), Direction::Right);

        let outcome = game.tick().unwrap();

        assert_eq!(outcome, TickOutcome::Advanced { ate_food: true });
        assert_eq!(game.snake().to_vec(), cells(&[(11, 10), (10, 10), (9, 10), (8, 10)]));
        assert_eq!(game.score(), 10);
        assert!(!game.snake().contains(&game.food()));
    }

    #[test]
    fn test_scenario_b_reversal_ignored() {
        let mut game = running_game(&[(10, 10), (10, 9), (10, 8)], (0, 0), Direction::Down);

        assert!(!game.on_direction_key("ArrowUp"));
        game.tick().unwrap();

        assert_eq!(game.heading(), Direction::Down);
        assert_eq!(game.snake().head(), Cell::new(10, 11));
    }

    #[test]
    fn test_scenario_c_wall() {
        let mut game = running_game(&[(19, 10), (18, 10), (17, 10)], (0, 0), Direction::Right);
        let before = game.snapshot();

        let outcome = game.tick().unwrap();

        assert_eq!(
            outcome,
            TickOutcome::GameOver(GameOverEvent {
                final_score: 0,
                cause: GameOverCause::WallCollision,
            })
        );
        let after = game.snapshot();
        assert_eq!(after.status, GameStatus::GameOver);
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.food, before.food);
    }

    #[test]
    fn test_scenario_e_paused_ticks_change_nothing() {
        let mut game = running_game(&[(10, 10), (9, 10), (8, 10)], (11, 10), Direction::Right);
        assert!(game.toggle_pause());
        let before = game.snapshot();

        for _ in 0..10 {
            assert_eq!(game.tick().unwrap(), TickOutcome::Skipped);
        }

        assert_eq!(game.snapshot(), before);
        assert_eq!(before.status, GameStatus::Paused);
    }

    #[test]
    fn test_resume_keeps_state() {
        let mut game = running_game(&[(10, 10), (9, 10), (8, 10)], (0, 0), Direction::Right);
        game.tick().unwrap();
        game.toggle_pause();
        game.toggle_pause();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.snake().head(), Cell::new(11, 10));
        game.tick().unwrap();
        assert_eq!(game.snake().head(), Cell::new(12, 10));
    }

    #[test]
    fn test_pending_direction_applied_on_next_tick_only() {
        let mut game = running_game(&[(10, 10), (9, 10), (8, 10)], (0, 0), Direction::Right);
        assert!(game.request_direction(Direction::Up));
        assert!(game.request_direction(Direction::Down));
        assert_eq!(game.heading(), Direction::Right);

        game.tick().unwrap();

        assert_eq!(game.heading(), Direction::Down);
        assert_eq!(game.snake().head(), Cell::new(10, 11));
        assert_eq!(game.pending_direction(), None);
    }

    #[test]
    fn test_score_is_ten_per_food() {
        let mut game = running_game(&[(2, 5), (1, 5), (0, 5)], (3, 5), Direction::Right);
        for k in 1..=5u32 {
            // Keep food directly ahead of the head.
            let ahead = game.snake().head().offset(Direction::Right);
            game.food = ahead;
            assert_eq!(game.tick().unwrap(), TickOutcome::Advanced { ate_food: true });
            assert_eq!(game.score(), 10 * k);
            assert_eq!(game.snake().len(), 3 + k as usize);
        }
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut game = running_game(&[(19, 0), (18, 0)], (0, 19), Direction::Up);
        assert!(matches!(game.tick().unwrap(), TickOutcome::GameOver(_)));
        assert!(!game.toggle_pause());
        assert!(!game.request_direction(Direction::Left));
        assert_eq!(game.tick().unwrap(), TickOutcome::Skipped);

        assert!(game.on_key(" ").unwrap());
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.snake().to_vec(), cells(&[(10, 10), (9, 10), (8, 10)]));
        assert_eq!(game.game_over_event(), None);
    }

    #[test]
    fn test_space_toggles_pause_while_running() {
        let mut game = SnakeGame::new(SnakeSettings::default(), SessionRng::new(5));
        assert!(game.on_key("Enter").unwrap());
        assert!(game.on_key(" ").unwrap());
        assert_eq!(game.status(), GameStatus::Paused);
        assert!(game.on_key(" ").unwrap());
        assert_eq!(game.status(), GameStatus::Running);
        assert!(!game.on_key("Enter").unwrap());
        assert!(!game.on_key("F5").unwrap());
    }

    #[test]
    fn test_score_eligibility() {
        let mut game = running_game(&[(19, 10), (18, 10)], (0, 0), Direction::Right);
        assert_eq!(game.score_eligibility(), ScoreEligibility::NotFinished);
        game.tick().unwrap();
        assert_eq!(game.score_eligibility(), ScoreEligibility::IdentityRequired { score: 0 });

        let ann = PlayerName::parse("Ann", 32).unwrap();
        game.set_known_identity(Some(ann.clone()));
        assert_eq!(
            game.score_eligibility(),
            ScoreEligibility::ReadyToSubmit { identity: ann, score: 0 }
        );
    }

    #[test]
    fn test_running_with_rejects_food_on_snake() {
        let result = SnakeGame::running_with(
            SnakeSettings::default(),
            SessionRng::new(1),
            Snake::from_cells(cells(&[(1, 1), (0, 1)])).unwrap(),
            Cell::new(0, 1),
            Direction::Right,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_requests_ignored_when_idle() {
        let mut game = SnakeGame::new(SnakeSettings::default(), SessionRng::new(1));
        assert!(!game.on_direction_key("ArrowDown"));
        assert_eq!(game.pending_direction(), None);
    }
}
