mod file_store;
mod gateway;
mod settings;
mod store;
mod submitter;
mod types;

pub use file_store::YamlFileScoreStore;
pub use gateway::{GatewayError, Leaderboard, ScoreGateway};
pub use settings::{DEFAULT_LEADERBOARD_SIZE, LeaderboardSettings};
pub use store::{InMemoryScoreStore, ScoreStore, ScoreTable, StoreError};
pub use submitter::{ScoreSubmitter, SubmissionReport};
pub use types::{ErrorPayload, LeaderboardEntry, ScoreSubmission};
