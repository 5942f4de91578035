use super::types::{Direction, GameStatus};

/// What a raw key symbol asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    /// Space: starts an idle or finished game, otherwise toggles pause.
    StartOrPause,
    Start,
}

/// Maps arrow keys and WASD (either case) to a direction.
pub fn direction_for_key(symbol: &str) -> Option<Direction> {
    match symbol {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

pub fn key_action(symbol: &str) -> Option<KeyAction> {
    match symbol {
        " " | "Space" => Some(KeyAction::StartOrPause),
        "Enter" => Some(KeyAction::Start),
        other => direction_for_key(other).map(KeyAction::Turn),
    }
}

/// Buffers the heading requested between two ticks. Only the latest accepted
/// request survives until the next tick consumes it.
#[derive(Clone, Debug, Default)]
pub struct DirectionRouter {
    pending: Option<Direction>,
}

impl DirectionRouter {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Maps `input` and buffers it. Returns the accepted direction, or `None`
    /// when the symbol is unknown or would reverse the snake into its neck.
    pub fn request_direction(
        &mut self,
        input: &str,
        current_heading: Direction,
        snake_len: usize,
    ) -> Option<Direction> {
        let direction = direction_for_key(input)?;
        self.request(direction, current_heading, snake_len)
            .then_some(direction)
    }

    pub fn request(&mut self, direction: Direction, current_heading: Direction, snake_len: usize) -> bool {
        if snake_len > 1 && direction.is_opposite(&current_heading) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn take_pending(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn request_start(&self, status: GameStatus) -> bool {
        matches!(status, GameStatus::Idle | GameStatus::GameOver)
    }

    pub fn request_pause_toggle(&self, status: GameStatus) -> bool {
        matches!(status, GameStatus::Running | GameStatus::Paused)
    }
}
