use tokio::sync::mpsc;
use tokio::time::interval;

use crate::games::SnapshotBroadcaster;
use crate::{PlayerName, log};
use super::game_state::{SnakeGame, TickOutcome};
use super::step::EngineError;
use super::types::Direction;

/// Input delivered to a running session. Applied between ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnakeCommand {
    Key(String),
    DirectionKey(String),
    Turn(Direction),
    PauseToggle,
    Start,
    SetIdentity(Option<PlayerName>),
    Stop,
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives `game` with a fixed-period clock until `Stop` arrives or the
    /// command channel closes. The clock keeps firing in every status; ticks
    /// outside `Running` leave the game untouched but still publish a
    /// snapshot.
    pub async fn run(
        mut game: SnakeGame,
        mut commands: mpsc::UnboundedReceiver<SnakeCommand>,
        broadcaster: impl SnapshotBroadcaster,
    ) -> Result<SnakeGame, EngineError> {
        let mut tick_timer = interval(game.settings().tick_interval());

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    let outcome = game.tick().map_err(Self::abort)?;

                    broadcaster.broadcast_snapshot(game.snapshot()).await;

                    if let TickOutcome::GameOver(event) = outcome {
                        broadcaster.broadcast_game_over(event).await;
                    }
                }
                command = commands.recv() => {
                    match command {
                        Some(SnakeCommand::Stop) | None => break,
                        Some(command) => {
                            Self::apply_command(&mut game, command).map_err(Self::abort)?
                        }
                    }
                }
            }
        }

        Ok(game)
    }

    fn abort(e: EngineError) -> EngineError {
        log!("Snake session aborted: {}", e);
        e
    }

    fn apply_command(game: &mut SnakeGame, command: SnakeCommand) -> Result<(), EngineError> {
        match command {
            SnakeCommand::Key(symbol) => {
                game.on_key(&symbol)?;
            }
            SnakeCommand::DirectionKey(symbol) => {
                game.on_direction_key(&symbol);
            }
            SnakeCommand::Turn(direction) => {
                game.request_direction(direction);
            }
            SnakeCommand::PauseToggle => {
                game.on_pause_key();
            }
            SnakeCommand::Start => {
                game.on_start_key()?;
            }
            SnakeCommand::SetIdentity(identity) => game.set_known_identity(identity),
            SnakeCommand::Stop => {}
        }
        Ok(())
    }
}
