//! Game configuration, loaded from TOML with every field defaulted.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paytable::Paytable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Credits a fresh or reset session starts with
    pub starting_credits: u64,
    /// Credits charged per spin
    pub spin_cost: u64,
    /// Reward for exactly one matched line
    pub single_line_reward: u64,
    /// Flat reward for two or more matched lines
    pub multi_line_reward: u64,
    /// Flicker frames shown before the grid settles
    pub animation_frames: u32,
    /// Delay between flicker frames
    pub tick_interval_ms: u64,
    /// Secret half of the provably-fair seed pair
    pub server_seed: String,
    /// Player-chosen half of the seed pair
    pub client_seed: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let paytable = Paytable::simple_default();
        Self {
            starting_credits: 100,
            spin_cost: 10,
            single_line_reward: paytable.single_line,
            multi_line_reward: paytable.multi_line,
            animation_frames: 10,
            tick_interval_ms: 100,
            server_seed: "slotgrid-dev-server-seed".to_string(),
            client_seed: "player".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin_cost == 0 {
            return Err(ConfigError::Invalid("spin_cost must be positive".into()));
        }
        if self.multi_line_reward < self.single_line_reward {
            return Err(ConfigError::Invalid(format!(
                "multi_line_reward ({}) is below single_line_reward ({})",
                self.multi_line_reward, self.single_line_reward
            )));
        }
        if self.server_seed.is_empty() {
            return Err(ConfigError::Invalid("server_seed must not be empty".into()));
        }
        Ok(())
    }

    pub fn paytable(&self) -> Paytable {
        Paytable {
            single_line: self.single_line_reward,
            multi_line: self.multi_line_reward,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("spin_cost = 5\nclient_seed = \"alice\"").unwrap();
        assert_eq!(config.spin_cost, 5);
        assert_eq!(config.client_seed, "alice");
        assert_eq!(config.starting_credits, 100);
        assert_eq!(config.paytable(), Paytable::simple_default());
    }

    #[test]
    fn rejects_inverted_paytable() {
        let err = GameConfig::from_toml_str("single_line_reward = 200\nmulti_line_reward = 100")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_free_spins_and_bad_toml() {
        assert!(matches!(
            GameConfig::from_toml_str("spin_cost = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("spin_cost = \"ten\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/slotgrid.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
