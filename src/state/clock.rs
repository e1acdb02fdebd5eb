//! Countdown clock.
//!
//! The clock has no thread of its own. The owner advances it by elapsed
//! milliseconds and gets back the signals that fell due, in order.
//!
//! ```text
//! Idle ──start──▶ Running ──elapsed == duration──▶ Finished
//!  ▲                 │
//!  └─────cancel──────┘
//! ```
//!
//! A Finished clock is terminal; the owner builds a new one for the next round.

use log::{trace, warn};

/// Clock lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStatus {
    #[default]
    Idle,
    Running,
    Finished,
}

impl ClockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignalKind {
    /// Whole seconds left, floored.
    Tick { remaining_seconds: u32 },
    Finished,
}

/// A signal emitted by a clock, tagged with the clock's generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSignal {
    pub generation: u64,
    pub kind: ClockSignalKind,
}

/// Single-timeline countdown.
#[derive(Debug, Clone)]
pub struct GameClock {
    generation: u64,
    status: ClockStatus,
    duration_ms: u64,
    interval_ms: u64,
    elapsed_ms: u64,
    /// Elapsed time at which the next tick is due.
    next_tick_ms: u64,
}

impl GameClock {
    /// Create an idle clock.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            status: ClockStatus::Idle,
            duration_ms: 0,
            interval_ms: 0,
            elapsed_ms: 0,
            next_tick_ms: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> ClockStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == ClockStatus::Running
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms - self.elapsed_ms
    }

    /// Start counting down from `duration_ms`, ticking every `interval_ms`.
    ///
    /// Only an idle clock can start. Starting a running or finished clock
    /// panics in debug builds and is ignored otherwise.
    pub fn start(&mut self, duration_ms: u64, interval_ms: u64) {
        debug_assert!(
            self.status == ClockStatus::Idle,
            "clock {} started while {}",
            self.generation,
            self.status.as_str()
        );
        if self.status != ClockStatus::Idle {
            warn!(
                "Ignoring start of clock {} while {}",
                self.generation,
                self.status.as_str()
            );
            return;
        }

        let interval_ms = interval_ms.max(1);
        self.duration_ms = duration_ms;
        self.interval_ms = interval_ms;
        self.elapsed_ms = 0;
        self.next_tick_ms = interval_ms.min(duration_ms);
        self.status = ClockStatus::Running;
    }

    /// Stop a running clock. No signal is emitted afterwards. Idempotent.
    pub fn cancel(&mut self) {
        if self.status == ClockStatus::Running {
            self.status = ClockStatus::Idle;
        }
    }

    /// Advance by `delta_ms` and collect every signal that fell due.
    ///
    /// The last tick reports 0 and is immediately followed by `Finished`.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<ClockSignal> {
        if self.status != ClockStatus::Running {
            trace!(
                "Clock {} is {}, dropping {}ms",
                self.generation,
                self.status.as_str(),
                delta_ms
            );
            return Vec::new();
        }

        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(delta_ms)
            .min(self.duration_ms);

        let mut signals = Vec::new();
        while self.elapsed_ms >= self.next_tick_ms {
            let remaining_ms = self.duration_ms - self.next_tick_ms;
            signals.push(self.signal(ClockSignalKind::Tick {
                remaining_seconds: seconds_floor(remaining_ms),
            }));

            if self.next_tick_ms >= self.duration_ms {
                self.status = ClockStatus::Finished;
                signals.push(self.signal(ClockSignalKind::Finished));
                break;
            }
            self.next_tick_ms = (self.next_tick_ms + self.interval_ms).min(self.duration_ms);
        }
        signals
    }

    fn signal(&self, kind: ClockSignalKind) -> ClockSignal {
        ClockSignal {
            generation: self.generation,
            kind,
        }
    }
}

fn seconds_floor(ms: u64) -> u32 {
    u32::try_from(ms / 1000).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ticks(signals: &[ClockSignal]) -> Vec<u32> {
        signals
            .iter()
            .filter_map(|s| match s.kind {
                ClockSignalKind::Tick { remaining_seconds } => Some(remaining_seconds),
                ClockSignalKind::Finished => None,
            })
            .collect()
    }

    fn finished_count(signals: &[ClockSignal]) -> usize {
        signals
            .iter()
            .filter(|s| s.kind == ClockSignalKind::Finished)
            .count()
    }

    #[test]
    fn test_clock_new() {
        let clock = GameClock::new(3);
        assert_eq!(clock.status(), ClockStatus::Idle);
        assert_eq!(clock.generation(), 3);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_idle_clock_emits_nothing() {
        let mut clock = GameClock::new(0);
        assert!(clock.advance(10_000).is_empty());
    }

    #[test]
    fn test_ticks_each_interval() {
        let mut clock = GameClock::new(1);
        clock.start(5000, 1000);

        assert!(clock.advance(999).is_empty());
        assert_eq!(
            clock.advance(1),
            vec![ClockSignal {
                generation: 1,
                kind: ClockSignalKind::Tick {
                    remaining_seconds: 4
                },
            }]
        );
        assert_eq!(clock.remaining_ms(), 4000);
    }

    #[test]
    fn test_full_countdown() {
        let mut clock = GameClock::new(1);
        clock.start(60_000, 1000);

        let mut all = Vec::new();
        for _ in 0..60 {
            all.extend(clock.advance(1000));
        }

        assert_eq!(ticks(&all), (0..60).rev().collect::<Vec<u32>>());
        assert_eq!(finished_count(&all), 1);
        assert_eq!(all.last().map(|s| s.kind), Some(ClockSignalKind::Finished));
        assert_eq!(clock.status(), ClockStatus::Finished);

        // Terminal
        assert!(clock.advance(5000).is_empty());
    }

    #[test]
    fn test_large_step_emits_every_tick_in_order() {
        let mut clock = GameClock::new(1);
        clock.start(10_000, 1000);

        let signals = clock.advance(3500);
        assert_eq!(ticks(&signals), vec![9, 8, 7]);

        let signals = clock.advance(1_000_000);
        assert_eq!(ticks(&signals), vec![6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(finished_count(&signals), 1);
    }

    #[test]
    fn test_uneven_duration_floors_to_zero() {
        let mut clock = GameClock::new(1);
        clock.start(1500, 1000);

        let signals = clock.advance(2000);
        assert_eq!(ticks(&signals), vec![0, 0]);
        assert_eq!(finished_count(&signals), 1);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_advance() {
        let mut clock = GameClock::new(1);
        clock.start(0, 1000);

        let signals = clock.advance(0);
        assert_eq!(ticks(&signals), vec![0]);
        assert_eq!(finished_count(&signals), 1);
    }

    #[test]
    fn test_cancel_stops_signals() {
        let mut clock = GameClock::new(1);
        clock.start(60_000, 1000);
        clock.advance(2000);

        clock.cancel();
        assert_eq!(clock.status(), ClockStatus::Idle);
        assert!(clock.advance(1_000_000).is_empty());

        // Idempotent
        clock.cancel();
        assert_eq!(clock.status(), ClockStatus::Idle);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "started while running")]
    fn test_double_start_panics_in_debug() {
        let mut clock = GameClock::new(1);
        clock.start(60_000, 1000);
        clock.start(60_000, 1000);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "started while finished")]
    fn test_restart_finished_panics_in_debug() {
        let mut clock = GameClock::new(1);
        clock.start(1000, 1000);
        clock.advance(1000);
        clock.start(1000, 1000);
    }
}
