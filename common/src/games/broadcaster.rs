use std::future::Future;

use super::snake::{GameOverEvent, GameSnapshot};

/// Receives what a running session publishes. Implementations must not hold
/// on to a snapshot across ticks; each tick delivers a fresh copy.
pub trait SnapshotBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_snapshot(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, event: GameOverEvent) -> impl Future<Output = ()> + Send;
}
