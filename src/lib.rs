//! Timefighter State Library
//!
//! This crate provides the game logic for Timefighter, a single-screen timed
//! tap-counting game: tap as often as possible before the 60 second clock
//! runs out.
//!
//! # Overview
//!
//! - **Game State** - Score, time left and whether the round has started.
//!
//! - **Game Clock** - A countdown that ticks once per second and finishes once.
//!   It has no thread; the host advances it with elapsed time.
//!
//! - **Session** - Starts the clock on the first tap, ends and resets the round
//!   when time runs out, and suspends/resumes through a [`Snapshot`].
//!
//! # Design Principles
//!
//! 1. **One live clock** - Replacing a clock always cancels the old one, and
//!    signals from old clocks are dropped.
//!
//! 2. **No rendering** - The session emits numeric [`GameEvent`]s; formatting is
//!    the display's job.
//!
//! 3. **Snapshots are untrusted** - Bad host data resets to a fresh game.
//!
//! # Example
//!
//! ```rust
//! use timefighter_state::{GameEvent, Session};
//!
//! let mut session = Session::new();
//! session.take_events();
//!
//! // First tap starts the round
//! assert!(session.tap().game_just_started);
//!
//! session.advance(1000);
//! assert_eq!(
//!     session.take_events(),
//!     vec![
//!         GameEvent::ScoreChanged { score: 1 },
//!         GameEvent::TimeChanged { seconds_remaining: 59 },
//!     ]
//! );
//!
//! // Suspend and resume elsewhere
//! let snapshot = session.suspend();
//! let mut resumed = Session::new();
//! resumed.resume(&snapshot).unwrap();
//! assert_eq!(resumed.state().time_left_seconds(), 59);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
