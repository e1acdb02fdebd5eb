//! State management module for Timefighter.
//!
//! - `config` - Round length and tick cadence
//! - `game` - Score / time left / started flag, and the suspend snapshot
//! - `clock` - Caller-driven countdown clock
//! - `session` - Session controller tying one game to one live clock
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Session                               │
//! │                                                                │
//! │   tap ──▶ GameState.tap() ──first tap──▶ GameClock.start()     │
//! │                                                                │
//! │   advance(ms) ──▶ GameClock ──Tick──▶ GameState.on_tick()      │
//! │                      │                                         │
//! │                      └──Finished──▶ RoundEnded, reset,         │
//! │                                     new GameClock              │
//! │                                                                │
//! │   suspend ──▶ cancel clock, Snapshot ──▶ host                  │
//! │   resume(Snapshot) ──▶ restore, new GameClock, start           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All calls happen on one thread of control; the session owns both the
//! game state and the clock.

pub mod clock;
pub mod config;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use clock::{ClockSignal, ClockSignalKind, ClockStatus, GameClock};
pub use config::{GameConfig, TICK_INTERVAL_MS, TOTAL_DURATION_SECONDS};
pub use game::{GameError, GameState, Snapshot, TapResult};
pub use session::{GameEvent, RoundRecord, Session};
