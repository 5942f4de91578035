use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::{ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer};
use crate::{PlayerName, log};
use super::store::{ScoreStore, ScoreTable, StoreError};
use super::types::LeaderboardEntry;

/// Keeps the whole score table in a YAML document, rewritten on every insert.
pub struct YamlFileScoreStore {
    provider: FileContentConfigProvider,
    serializer: YamlConfigSerializer,
    table: Mutex<Option<ScoreTable>>,
}

impl YamlFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            provider: FileContentConfigProvider::new(path),
            serializer: YamlConfigSerializer::new(),
            table: Mutex::new(None),
        }
    }

    fn load(&self) -> Result<ScoreTable, StoreError> {
        let Some(content) = self
            .provider
            .get_config_content()
            .map_err(StoreError::Unavailable)?
        else {
            return Ok(ScoreTable::default());
        };

        let table: ScoreTable = self
            .serializer
            .deserialize(&content)
            .map_err(StoreError::Corrupt)?;
        table.check().map_err(StoreError::Corrupt)?;

        log!(
            "Loaded {} scores from {}",
            table.len(),
            self.provider.path().display()
        );
        Ok(table)
    }

    async fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        let content = self
            .serializer
            .serialize(table)
            .map_err(StoreError::Unavailable)?;
        let provider = self.provider.clone();
        tokio::task::spawn_blocking(move || provider.set_config_content(&content))
            .await
            .map_err(|e| StoreError::Unavailable(format!("Score file writer failed: {}", e)))?
            .map_err(StoreError::Unavailable)
    }
}

impl ScoreStore for YamlFileScoreStore {
    async fn insert(
        &self,
        identity: PlayerName,
        score: u64,
        created_at: DateTime<Utc>,
    ) -> Result<LeaderboardEntry, StoreError> {
        let mut guard = self.table.lock().await;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        let table = guard.get_or_insert_with(ScoreTable::default);

        let mut updated = table.clone();
        let entry = updated.insert(identity, score, created_at);
        self.save(&updated).await?;
        *table = updated;
        Ok(entry)
    }

    async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut guard = self.table.lock().await;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        Ok(guard.get_or_insert_with(ScoreTable::default).top(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "snake_scores_{}_{}_{}.yaml",
            name,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[tokio::test]
    async fn test_scores_survive_reopen() {
        let path = temp_path("reopen");
        {
            let store = YamlFileScoreStore::new(&path);
            let ann = PlayerName::parse("Ann", 32).unwrap();
            let bob = PlayerName::parse("Bob", 32).unwrap();
            store.insert(ann, 50, Utc::now()).await.unwrap();
            store.insert(bob, 70, Utc::now()).await.unwrap();
        }

        let reopened = YamlFileScoreStore::new(&path);
        let top = reopened.top(10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].identity.as_str(), "Bob");
        assert_eq!(top[1].score, 50);

        let next = reopened
            .insert(PlayerName::parse("Cy", 32).unwrap(), 10, Utc::now())
            .await
            .unwrap();
        assert!(next.id > top[0].id && next.id > top[1].id);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_insert_rewrites_file_as_valid_table() {
        let path = temp_path("rewrite");
        let store = YamlFileScoreStore::new(&path);
        for score in [5, 15, 25] {
            store
                .insert(PlayerName::parse("Dee", 32).unwrap(), score, Utc::now())
                .await
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let table: ScoreTable = serde_yaml_ng::from_str(&content).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.check().is_ok());

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        assert!(!PathBuf::from(temp_name).exists());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_board() {
        let store = YamlFileScoreStore::new(temp_path("missing"));
        assert!(store.top(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "entries: [this is not a table").unwrap();
        let store = YamlFileScoreStore::new(&path);
        assert!(matches!(store.top(10).await, Err(StoreError::Corrupt(_))));
        let _ = std::fs::remove_file(&path);
    }
}
