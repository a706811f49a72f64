//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Phase identification and labels
//! - Timer configuration with validation
//! - Phase sequencing state (work/break cycle counter)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Phase
// ============================================================================

/// A named countdown interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work session
    #[default]
    Work,
    /// Short break between work sessions
    Break,
    /// Long break after every N work sessions
    LongBreak,
}

impl Phase {
    /// Returns the human-readable label used in phase announcements.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Returns true for both break kinds.
    pub fn is_break(&self) -> bool {
        matches!(self, Phase::Break | Phase::LongBreak)
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors raised while building a [`PomodoroConfig`] from user input.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A minute value was negative.
    #[error("invalid value {value} for {name}: duration must not be negative")]
    Negative {
        /// Name of the offending setting
        name: &'static str,
        /// Value as given
        value: f64,
    },

    /// A minute value was NaN, infinite or too large to represent.
    #[error("invalid value {value} for {name}: duration out of range")]
    OutOfRange {
        /// Name of the offending setting
        name: &'static str,
        /// Value as given
        value: f64,
    },
}

/// Converts a float number of minutes into a [`Duration`].
pub fn minutes_to_duration(name: &'static str, minutes: f64) -> Result<Duration, ConfigError> {
    if minutes < 0.0 {
        return Err(ConfigError::Negative {
            name,
            value: minutes,
        });
    }
    Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| ConfigError::OutOfRange {
        name,
        value: minutes,
    })
}

// ============================================================================
// PomodoroConfig
// ============================================================================

/// Default number of work sessions before a long break.
pub const DEFAULT_LOOPS: u32 = 3;

/// Immutable configuration for the Pomodoro timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Work duration
    pub work: Duration,
    /// Short break duration
    pub short_break: Duration,
    /// Long break duration (2x the short break unless overridden)
    pub long_break: Duration,
    /// Work sessions before a long break
    pub loops: u32,
    /// Whether each phase waits for user confirmation
    pub confirm: bool,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(25 * 60), Duration::from_secs(5 * 60))
    }
}

impl PomodoroConfig {
    /// Creates a configuration with the long break derived from the short break.
    pub fn new(work: Duration, short_break: Duration) -> Self {
        Self {
            work,
            short_break,
            long_break: short_break.saturating_mul(2),
            loops: DEFAULT_LOOPS,
            confirm: false,
        }
    }

    /// Overrides the derived long break duration.
    pub fn with_long_break(mut self, long_break: Duration) -> Self {
        self.long_break = long_break;
        self
    }

    /// Sets the number of work sessions before a long break.
    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops;
        self
    }

    /// Enables or disables the confirmation gate.
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    /// Builds a configuration from minute values as given on the command line.
    ///
    /// `long_break_minutes` is only applied when explicitly provided.
    pub fn from_minutes(
        work_minutes: f64,
        break_minutes: f64,
        long_break_minutes: Option<f64>,
        loops: u32,
        confirm: bool,
    ) -> Result<Self, ConfigError> {
        let work = minutes_to_duration("work", work_minutes)?;
        let short_break = minutes_to_duration("break", break_minutes)?;

        let mut config = Self::new(work, short_break)
            .with_loops(loops)
            .with_confirm(confirm);
        if let Some(minutes) = long_break_minutes {
            config = config.with_long_break(minutes_to_duration("longbreak", minutes)?);
        }
        Ok(config)
    }

    /// Returns the configured duration for a phase.
    pub fn duration_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::Break => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

// ============================================================================
// SequencerState
// ============================================================================

/// Mutable cycle state owned by the phase sequencer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    /// Current slot: `Work`, or a break slot (`Break`/`LongBreak`)
    pub phase: Phase,
    /// Completed work sessions since the last long break, in `[0, loops]`
    pub cycle_count: u32,
}

impl SequencerState {
    /// Creates the initial state: work slot, counter 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides which phase runs next without mutating the state.
    pub fn next_phase(&self, loops: u32) -> Phase {
        if self.phase == Phase::Work {
            Phase::Work
        } else if self.cycle_count < loops {
            Phase::Break
        } else {
            Phase::LongBreak
        }
    }

    /// Records completion of `phase` and moves to the next slot.
    pub fn complete(&mut self, phase: Phase) {
        match phase {
            Phase::Work => {
                self.cycle_count = self.cycle_count.saturating_add(1);
                self.phase = Phase::Break;
            }
            Phase::Break => {
                self.phase = Phase::Work;
            }
            Phase::LongBreak => {
                self.cycle_count = 0;
                self.phase = Phase::Work;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
