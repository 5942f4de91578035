use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_PLAYER_NAME_LEN;
use crate::config::Validate;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardSettings {
    pub size: usize,
    pub max_identity_len: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_LEADERBOARD_SIZE,
            max_identity_len: DEFAULT_MAX_PLAYER_NAME_LEN,
        }
    }
}

impl Validate for LeaderboardSettings {
    fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.size) {
            return Err("Leaderboard size must be between 1 and 100".to_string());
        }
        if !(1..=DEFAULT_MAX_PLAYER_NAME_LEN).contains(&self.max_identity_len) {
            return Err(format!(
                "Max identity length must be between 1 and {}",
                DEFAULT_MAX_PLAYER_NAME_LEN
            ));
        }
        Ok(())
    }
}
