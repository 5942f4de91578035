use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntryId, PlayerName};

/// A recorded score. Never modified after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: EntryId,
    pub identity: PlayerName,
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated submit request as it arrives from a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    #[serde(alias = "playerName")]
    pub identity: String,
    pub score: i64,
}

impl ScoreSubmission {
    pub fn new(identity: impl Into<String>, score: i64) -> Self {
        Self {
            identity: identity.into(),
            score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_accepts_player_name_alias() {
        let submission: ScoreSubmission =
            serde_json::from_str(r#"{"playerName": "Ann", "score": 50}"#).unwrap();
        assert_eq!(submission, ScoreSubmission::new("Ann", 50));
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = LeaderboardEntry {
            id: EntryId::new(1),
            identity: PlayerName::parse("Ann", 32).unwrap(),
            score: 50,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["identity"], "Ann");
        assert_eq!(json["score"], 50);
        assert!(json["createdAt"].is_string());
    }
}
