use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::grid::{Grid, DEFAULT_GRID_SIZE};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_FOOD_SCORE: u32 = 10;
pub const MAX_FOOD_SCORE: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub grid_size: usize,
    pub tick_interval_ms: u64,
    pub food_score: u32,
}

impl SnakeSettings {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_score: DEFAULT_FOOD_SCORE,
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if !(4..=100).contains(&self.grid_size) {
            return Err("Grid size must be between 4 and 100".to_string());
        }
        if !(50..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        if !(1..=MAX_FOOD_SCORE).contains(&self.food_score) {
            return Err(format!("Food score must be between 1 and {}", MAX_FOOD_SCORE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SnakeSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid().size(), 20);
        assert_eq!(settings.tick_interval(), Duration::from_millis(100));
        assert_eq!(settings.food_score, 10);
    }

    #[test]
    fn test_validation_bounds() {
        let too_small = SnakeSettings { grid_size: 3, ..Default::default() };
        assert!(too_small.validate().is_err());
        let too_fast = SnakeSettings { tick_interval_ms: 10, ..Default::default() };
        assert!(too_fast.validate().is_err());
        let no_score = SnakeSettings { food_score: 0, ..Default::default() };
        assert!(no_score.validate().is_err());
    }

    #[test]
    fn test_food_score_upper_bound() {
        let max = SnakeSettings { food_score: MAX_FOOD_SCORE, ..Default::default() };
        assert!(max.validate().is_ok());
        let huge = SnakeSettings { food_score: u32::MAX / 2 + 1, ..Default::default() };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: SnakeSettings = serde_yaml_ng::from_str("grid_size: 30\n").unwrap();
        assert_eq!(settings.grid_size, 30);
        assert_eq!(settings.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }
}
