//! Session controller.
//!
//! Binds one [`GameState`] to at most one live [`GameClock`]. Every clock
//! replacement cancels the previous clock first and bumps the generation, so
//! signals from an old clock are recognised and dropped.

use chrono::{DateTime, Utc};
use log::{debug, trace, warn};

use super::clock::{ClockSignal, ClockSignalKind, ClockStatus, GameClock};
use super::config::GameConfig;
use super::game::{GameError, GameState, Snapshot, TapResult};

/// Events for the display collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    TimeChanged { seconds_remaining: u32 },
    RoundEnded { final_score: u32 },
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScoreChanged { .. } => "score_changed",
            Self::TimeChanged { .. } => "time_changed",
            Self::RoundEnded { .. } => "round_ended",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::ScoreChanged { score } => serde_json::json!({
                "type": self.as_str(),
                "score": score
            }),
            Self::TimeChanged { seconds_remaining } => serde_json::json!({
                "type": self.as_str(),
                "seconds_remaining": seconds_remaining
            }),
            Self::RoundEnded { final_score } => serde_json::json!({
                "type": self.as_str(),
                "final_score": final_score
            }),
        }
    }
}

/// A finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub final_score: u32,
    /// When the clock started (first tap, or resume for restored rounds)
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// One player's game session.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    clock: GameClock,
    /// Generation of the most recently built clock
    generation: u64,
    /// Events not yet taken by the display
    events: Vec<GameEvent>,
    suspended: bool,
    round_started_at: Option<DateTime<Utc>>,
    last_round: Option<RoundRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session with the default 60 second round.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Fresh session; an invalid config falls back to the default.
    pub fn with_config(config: GameConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{}, using default config", e);
                GameConfig::default()
            }
        };

        let mut session = Self {
            config,
            state: GameState::new(config.total_duration_seconds),
            clock: GameClock::new(0),
            generation: 0,
            events: Vec::new(),
            suspended: false,
            round_started_at: None,
            last_round: None,
        };
        session.reset_round();
        debug!("Session created. Score is: {}", session.state.score());
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }

    /// Drain pending display events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Player tap. The first tap of a round starts the clock.
    pub fn tap(&mut self) -> TapResult {
        let result = self.state.tap();
        self.events.push(GameEvent::ScoreChanged {
            score: result.new_score,
        });

        if result.game_just_started {
            self.start_clock(self.config.total_duration_ms());
            debug!("Round started on clock {}", self.generation);
        }
        result
    }

    /// Advance simulated time on the active clock and apply due signals.
    pub fn advance(&mut self, elapsed_ms: u64) {
        for signal in self.clock.advance(elapsed_ms) {
            self.handle_signal(signal);
        }
    }

    /// Apply one clock signal. Signals from a replaced or cancelled clock
    /// are discarded.
    pub fn handle_signal(&mut self, signal: ClockSignal) {
        if signal.generation != self.clock.generation()
            || self.clock.status() == ClockStatus::Idle
        {
            trace!(
                "Discarding stale {:?} from clock {} (active clock {} is {})",
                signal.kind,
                signal.generation,
                self.clock.generation(),
                self.clock.status().as_str()
            );
            return;
        }

        match signal.kind {
            ClockSignalKind::Tick { remaining_seconds } => {
                trace!("Tick: {}s left", remaining_seconds);
                self.state.on_tick(remaining_seconds);
                self.events.push(GameEvent::TimeChanged {
                    seconds_remaining: remaining_seconds,
                });
            }
            ClockSignalKind::Finished => self.end_round(),
        }
    }

    /// Current snapshot, without touching the clock.
    pub fn save_snapshot(&self) -> Snapshot {
        self.state.save_snapshot()
    }

    /// Host is about to suspend: stop the clock and hand back the snapshot.
    pub fn suspend(&mut self) -> Snapshot {
        self.clock.cancel();
        self.suspended = true;

        let snapshot = self.save_snapshot();
        debug!(
            "Suspending: saving score {} & time left {}",
            snapshot.score, snapshot.time_left_seconds
        );
        snapshot
    }

    /// Resume a suspended round. The clock restarts from the snapshot's time
    /// left, not from the full round.
    ///
    /// An invalid snapshot resets to a fresh game and the error is returned
    /// as a warning for the host.
    pub fn resume(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        self.suspended = false;

        if let Err(e) = self.state.restore(snapshot) {
            warn!("{}, starting a fresh game", e);
            self.reset_round();
            return Err(e);
        }

        let time_left = self.state.time_left_seconds();
        self.replace_clock();
        self.start_clock(u64::from(time_left) * 1000);
        self.events.push(GameEvent::ScoreChanged {
            score: self.state.score(),
        });
        self.events.push(GameEvent::TimeChanged {
            seconds_remaining: time_left,
        });

        debug!(
            "Resumed with score {} & time left {} on clock {}",
            self.state.score(),
            time_left,
            self.generation
        );
        Ok(())
    }

    /// Host is tearing the session down.
    pub fn shutdown(&mut self) {
        self.clock.cancel();
        debug!("Session shut down with score {}", self.state.score());
    }

    fn start_clock(&mut self, duration_ms: u64) {
        self.clock.start(duration_ms, self.config.tick_interval_ms);
        self.suspended = false;
        self.round_started_at = Some(Utc::now());
    }

    fn end_round(&mut self) {
        let final_score = self.state.score();
        let ended_at = Utc::now();

        self.events.push(GameEvent::RoundEnded { final_score });
        self.last_round = Some(RoundRecord {
            final_score,
            started_at: self.round_started_at.unwrap_or(ended_at),
            ended_at,
        });
        debug!("Round over! Final score: {}", final_score);

        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.state.reset(self.config.total_duration_seconds);
        self.replace_clock();
        self.round_started_at = None;

        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.events.push(GameEvent::TimeChanged {
            seconds_remaining: self.config.total_duration_seconds,
        });
    }

    /// Cancel the active clock, then swap in a new idle one.
    fn replace_clock(&mut self) {
        self.clock.cancel();
        self.generation += 1;
        self.clock = GameClock::new(self.generation);
    }
}
