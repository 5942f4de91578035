use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use common::config::Validate;
use common::games::snake::SnakeSettings;
use common::leaderboard::LeaderboardSettings;

pub const DEFAULT_CONFIG_PATH: &str = "snake_scores_server.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    Memory,
    YamlFile { path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub static_files_path: Option<PathBuf>,
    pub storage: StorageConfig,
    pub leaderboard: LeaderboardSettings,
    pub snake: SnakeSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_files_path: None,
            storage: StorageConfig::Memory,
            leaderboard: LeaderboardSettings::default(),
            snake: SnakeSettings::default(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.bind_address
            .parse::<std::net::SocketAddr>()
            .map_err(|e| format!("Invalid bind address '{}': {}", self.bind_address, e))?;
        if let StorageConfig::YamlFile { path } = &self.storage
            && path.as_os_str().is_empty()
        {
            return Err("Score file path must not be empty".to_string());
        }
        self.leaderboard.validate()?;
        self.snake.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_yaml_file_storage() {
        let yaml = r#"
bind_address: "127.0.0.1:8080"
storage:
  kind: yaml_file
  path: data/scores.yaml
leaderboard:
  size: 5
"#;
        let config: ServerConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.storage,
            StorageConfig::YamlFile { path: PathBuf::from("data/scores.yaml") }
        );
        assert_eq!(config.leaderboard.size, 5);
        assert_eq!(config.leaderboard.max_identity_len, 32);
        assert_eq!(config.snake, SnakeSettings::default());
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let config = ServerConfig {
            bind_address: "not an address".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
