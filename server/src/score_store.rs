use chrono::{DateTime, Utc};

use common::PlayerName;
use common::leaderboard::{
    InMemoryScoreStore, LeaderboardEntry, ScoreStore, StoreError, YamlFileScoreStore,
};

use crate::server_config::StorageConfig;

/// Storage backend picked from the server config.
pub enum ConfiguredScoreStore {
    Memory(InMemoryScoreStore),
    YamlFile(YamlFileScoreStore),
}

impl From<&StorageConfig> for ConfiguredScoreStore {
    fn from(config: &StorageConfig) -> Self {
        match config {
            StorageConfig::Memory => ConfiguredScoreStore::Memory(InMemoryScoreStore::new()),
            StorageConfig::YamlFile { path } => {
                ConfiguredScoreStore::YamlFile(YamlFileScoreStore::new(path))
            }
        }
    }
}

impl ScoreStore for ConfiguredScoreStore {
    async fn insert(
        &self,
        identity: PlayerName,
        score: u64,
        created_at: DateTime<Utc>,
    ) -> Result<LeaderboardEntry, StoreError> {
        match self {
            ConfiguredScoreStore::Memory(store) => store.insert(identity, score, created_at).await,
            ConfiguredScoreStore::YamlFile(store) => store.insert(identity, score, created_at).await,
        }
    }

    async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        match self {
            ConfiguredScoreStore::Memory(store) => store.top(limit).await,
            ConfiguredScoreStore::YamlFile(store) => store.top(limit).await,
        }
    }
}
