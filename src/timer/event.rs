//! Timer events for rendering and external consumers.

use serde::Serialize;

use crate::types::Phase;

/// Events emitted by the sequencer and the countdown.
///
/// The engine never writes to the terminal itself; a single consumer
/// renders these in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Waiting for one line of input before the phase starts
    AwaitingConfirmation {
        /// Phase about to start
        phase: Phase,
    },
    /// Phase countdown started
    PhaseStarted {
        /// Phase being run
        phase: Phase,
        /// Configured duration in milliseconds
        duration_ms: u64,
    },
    /// One tick processed while running
    Tick {
        /// Phase being run
        phase: Phase,
        /// Remaining time rounded to the nearest second
        remaining_seconds: u64,
    },
    /// Countdown paused
    Paused {
        /// Remaining time rounded to the nearest second
        remaining_seconds: u64,
    },
    /// Countdown resumed
    Resumed {
        /// Remaining time rounded to the nearest second
        remaining_seconds: u64,
    },
    /// Phase countdown reached zero
    PhaseCompleted {
        /// Phase that completed
        phase: Phase,
        /// Work sessions since the last long break, after the update
        cycle_count: u32,
    },
}
