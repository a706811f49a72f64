//! Countdown engine for a single phase.
//!
//! Elapsed time is measured from the clock on every tick rather than by
//! counting ticks, so missed or late ticks under load do not drift the
//! remaining time. Ticks and pause signals are serviced one per loop
//! iteration from a single task.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use super::event::TimerEvent;
use super::input::PauseSignals;
use crate::types::Phase;

/// Period of the status ticker.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Countdown
// ============================================================================

/// State of one phase's countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Duration,
    paused: bool,
    last_tick: Instant,
}

impl Countdown {
    /// Starts a countdown of `duration` at `now`.
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            remaining: duration,
            paused: false,
            last_tick: now,
        }
    }

    /// Charges the time since the last tick against the remaining time.
    ///
    /// Returns the new remaining time, or `None` while paused.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if self.paused {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.last_tick = now;
        Some(self.remaining)
    }

    /// Toggles the paused flag and returns the new value.
    ///
    /// Resuming restarts the elapsed-time reference at `now`, so the paused
    /// interval is never charged.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        self.paused = !self.paused;
        if !self.paused {
            self.last_tick = now;
        }
        self.paused
    }

    /// Remaining time.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Remaining time rounded to the nearest second.
    pub fn remaining_seconds(&self) -> u64 {
        round_to_seconds(self.remaining)
    }

    /// Returns true while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once no time remains.
    pub fn is_finished(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// Rounds a duration to the nearest whole second, halves rounding up.
pub fn round_to_seconds(duration: Duration) -> u64 {
    let millis = duration.as_millis().saturating_add(500) / 1000;
    u64::try_from(millis).unwrap_or(u64::MAX)
}

// ============================================================================
// run_countdown
// ============================================================================

/// Counts `duration` down for `phase`, emitting a tick event per period.
///
/// Returns once no time remains. A zero duration returns immediately
/// without emitting any tick. While paused the countdown never progresses.
pub async fn run_countdown(
    phase: Phase,
    duration: Duration,
    period: Duration,
    signals: &mut PauseSignals,
    event_tx: &mpsc::UnboundedSender<TimerEvent>,
) -> Result<()> {
    let start = Instant::now();
    let mut countdown = Countdown::new(duration, start);
    if countdown.is_finished() {
        return Ok(());
    }

    // Dropped on every return path, releasing the timer.
    let mut ticker = interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !countdown.is_finished() {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(remaining) = countdown.tick(Instant::now()) {
                    event_tx
                        .send(TimerEvent::Tick {
                            phase,
                            remaining_seconds: round_to_seconds(remaining),
                        })
                        .context("Failed to send tick event")?;
                }
            }
            _ = signals.next() => {
                let remaining_seconds = countdown.remaining_seconds();
                let event = if countdown.toggle_pause(Instant::now()) {
                    tracing::debug!(remaining_seconds, "Countdown paused");
                    TimerEvent::Paused { remaining_seconds }
                } else {
                    tracing::debug!(remaining_seconds, "Countdown resumed");
                    TimerEvent::Resumed { remaining_seconds }
                };
                event_tx
                    .send(event)
                    .context("Failed to send pause event")?;
            }
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
