//! Game state.
//!
//! Score, remaining time and the started flag for the current round, plus the
//! snapshot that crosses a suspend/resume boundary.

use serde::{Deserialize, Serialize};

use super::config::TOTAL_DURATION_SECONDS;

/// Outcome of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapResult {
    pub new_score: u32,
    /// True only for the tap that started the round.
    pub game_just_started: bool,
}

/// Minimal state needed to resume a suspended round.
///
/// Fields are signed because snapshots come back from the host and are not
/// trusted until validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: i64,
    pub time_left_seconds: i64,
}

impl Snapshot {
    pub fn new(score: i64, time_left_seconds: i64) -> Self {
        Self {
            score,
            time_left_seconds,
        }
    }

    /// Check the snapshot against a round length.
    pub fn validate(&self, total_duration_seconds: u32) -> Result<(u32, u32), GameError> {
        let invalid = || GameError::InvalidSnapshot {
            score: self.score,
            time_left_seconds: self.time_left_seconds,
            total_duration_seconds,
        };

        let score = u32::try_from(self.score).map_err(|_| invalid())?;
        let time_left = u32::try_from(self.time_left_seconds).map_err(|_| invalid())?;
        if time_left > total_duration_seconds {
            return Err(invalid());
        }
        Ok((score, time_left))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "score": self.score,
            "time_left_seconds": self.time_left_seconds
        })
    }
}

/// Score and timer state for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    score: u32,
    time_left_seconds: u32,
    started: bool,
    total_duration_seconds: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(TOTAL_DURATION_SECONDS)
    }
}

impl GameState {
    /// Create a fresh, not-yet-started game.
    pub fn new(total_duration_seconds: u32) -> Self {
        let mut state = Self {
            score: 0,
            time_left_seconds: 0,
            started: false,
            total_duration_seconds: 0,
        };
        state.reset(total_duration_seconds);
        state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left_seconds(&self) -> u32 {
        self.time_left_seconds
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn total_duration_seconds(&self) -> u32 {
        self.total_duration_seconds
    }

    /// Register a tap. Always valid.
    pub fn tap(&mut self) -> TapResult {
        self.score = self.score.saturating_add(1);

        let game_just_started = !self.started;
        self.started = true;

        TapResult {
            new_score: self.score,
            game_just_started,
        }
    }

    /// Back to a fresh game of the given length.
    pub fn reset(&mut self, total_duration_seconds: u32) {
        self.score = 0;
        self.time_left_seconds = total_duration_seconds;
        self.started = false;
        self.total_duration_seconds = total_duration_seconds;
    }

    /// Resume mid-round from a snapshot.
    ///
    /// A restored game always counts as started, even when the snapshot holds
    /// the full round length. On error the state is left unchanged.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        let (score, time_left) = snapshot.validate(self.total_duration_seconds)?;
        self.score = score;
        self.time_left_seconds = time_left;
        self.started = true;
        Ok(())
    }

    /// Clock tick. Remaining time never goes up while a round runs.
    pub fn on_tick(&mut self, remaining_seconds: u32) {
        debug_assert!(
            remaining_seconds <= self.time_left_seconds,
            "tick went backwards: {} -> {}",
            self.time_left_seconds,
            remaining_seconds
        );
        self.time_left_seconds = remaining_seconds;
    }

    pub fn save_snapshot(&self) -> Snapshot {
        Snapshot {
            score: i64::from(self.score),
            time_left_seconds: i64::from(self.time_left_seconds),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "score": self.score,
            "time_left_seconds": self.time_left_seconds,
            "started": self.started
        })
    }
}

/// Game errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(
        "Invalid snapshot (score {score}, time left {time_left_seconds}s) for a {total_duration_seconds}s round"
    )]
    InvalidSnapshot {
        score: i64,
        time_left_seconds: i64,
        total_duration_seconds: u32,
    },
    #[error("Invalid game config: {0}")]
    InvalidConfig(&'static str),
}
