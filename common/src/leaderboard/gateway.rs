use std::fmt;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;

use crate::{PlayerName, log};
use super::settings::LeaderboardSettings;
use super::store::{ScoreStore, StoreError};
use super::types::{ErrorPayload, LeaderboardEntry, ScoreSubmission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    Validation(String),
    Storage(String),
}

impl GatewayError {
    /// HTTP status the failure maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::Storage(_) => 500,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Validation(e) => write!(f, "Invalid data: {}", e),
            GatewayError::Storage(_) => write!(f, "Failed to access scores"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        GatewayError::Storage(e.to_string())
    }
}

/// Where finished games send their scores.
pub trait ScoreGateway: Send + Sync + Clone + 'static {
    fn submit(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<LeaderboardEntry, GatewayError>> + Send;

    fn top_scores(&self) -> impl Future<Output = Result<Vec<LeaderboardEntry>, GatewayError>> + Send;
}

pub struct Leaderboard<S: ScoreStore> {
    store: Arc<S>,
    settings: LeaderboardSettings,
}

impl<S: ScoreStore> Clone for Leaderboard<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S, settings: LeaderboardSettings) -> Self {
        Self {
            store: Arc::new(store),
            settings,
        }
    }

    pub fn settings(&self) -> &LeaderboardSettings {
        &self.settings
    }

    fn validate(&self, submission: &ScoreSubmission) -> Result<(PlayerName, u64), GatewayError> {
        let identity = PlayerName::parse(&submission.identity, self.settings.max_identity_len)
            .map_err(GatewayError::Validation)?;
        let score = u64::try_from(submission.score).map_err(|_| {
            GatewayError::Validation("score must be a non-negative integer".to_string())
        })?;
        Ok((identity, score))
    }
}

impl<S: ScoreStore> ScoreGateway for Leaderboard<S> {
    async fn submit(&self, submission: ScoreSubmission) -> Result<LeaderboardEntry, GatewayError> {
        let (identity, score) = self.validate(&submission)?;

        match self.store.insert(identity, score, Utc::now()).await {
            Ok(entry) => {
                log!("Recorded score {} for {} (entry {})", entry.score, entry.identity, entry.id);
                Ok(entry)
            }
            Err(e) => {
                log!("Error saving score: {}", e);
                Err(e.into())
            }
        }
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        self.store.top(self.settings.size).await.map_err(|e| {
            log!("Error fetching scores: {}", e);
            GatewayError::from(e)
        })
    }
}
