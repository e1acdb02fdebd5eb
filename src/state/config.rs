//! Game configuration.
//!
//! The round length and tick cadence are fixed for a session once it is
//! constructed.

use serde::{Deserialize, Serialize};

use super::game::GameError;

/// Round length in seconds.
pub const TOTAL_DURATION_SECONDS: u32 = 60;

/// Clock tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Round timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_duration_seconds: u32,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_duration_seconds: TOTAL_DURATION_SECONDS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn total_duration_ms(&self) -> u64 {
        u64::from(self.total_duration_seconds) * 1000
    }

    /// Reject configurations the clock cannot run.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.total_duration_seconds == 0 {
            return Err(GameError::InvalidConfig("round duration must be non-zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig("tick interval must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.total_duration_seconds, 60);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.total_duration_ms(), 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let zero_duration = GameConfig {
            total_duration_seconds: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            zero_duration.validate(),
            Err(GameError::InvalidConfig(_))
        ));

        let zero_interval = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"total_duration_seconds": 30}"#).unwrap();
        assert_eq!(
            config,
            GameConfig {
                total_duration_seconds: 30,
                tick_interval_ms: 1000,
            }
        );
    }
}
