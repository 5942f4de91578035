use std::cmp::Reverse;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{EntryId, PlayerName};
use super::types::LeaderboardEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable(String),
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(e) => write!(f, "Score storage unavailable: {}", e),
            StoreError::Corrupt(e) => write!(f, "Score storage corrupt: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence behind the leaderboard.
pub trait ScoreStore: Send + Sync + 'static {
    fn insert(
        &self,
        identity: PlayerName,
        score: u64,
        created_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<LeaderboardEntry, StoreError>> + Send;

    /// Highest scores first; equal scores keep insertion order.
    fn top(&self, limit: usize) -> impl Future<Output = Result<Vec<LeaderboardEntry>, StoreError>> + Send;
}

/// All entries in insertion order plus the next id to hand out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    next_id: EntryId,
    entries: Vec<LeaderboardEntry>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            next_id: EntryId::new(1),
            entries: Vec::new(),
        }
    }
}

impl ScoreTable {
    pub fn insert(&mut self, identity: PlayerName, score: u64, created_at: DateTime<Utc>) -> LeaderboardEntry {
        let entry = LeaderboardEntry {
            id: self.next_id,
            identity,
            score,
            created_at,
        };
        self.next_id = self.next_id.next();
        self.entries.push(entry.clone());
        entry
    }

    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        // Stable sort, so ties stay in insertion order.
        ranked.sort_by_key(|entry| Reverse(entry.score));
        ranked.into_iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn check(&self) -> Result<(), String> {
        if let Some(entry) = self.entries.iter().find(|e| e.id >= self.next_id) {
            return Err(format!(
                "Entry id {} is not below next id {}",
                entry.id, self.next_id
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    table: Arc<Mutex<ScoreTable>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for InMemoryScoreStore {
    async fn insert(
        &self,
        identity: PlayerName,
        score: u64,
        created_at: DateTime<Utc>,
    ) -> Result<LeaderboardEntry, StoreError> {
        let mut table = self.table.lock().await;
        Ok(table.insert(identity, score, created_at))
    }

    async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let table = self.table.lock().await;
        Ok(table.top(limit))
    }
}
