//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Phase sequencer cycling work, break and long-break phases
//! - Drift-free countdown engine with pause/resume from standard input
//! - CLI argument parsing (flag and positional forms) and display utilities
//! - Type definitions for configuration and cycle state

pub mod cli;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, Phase, PomodoroConfig, SequencerState};

pub use timer::{
    run_countdown, spawn_input_listener, Countdown, PauseSignal, PauseSignals, PhaseSequencer,
    TimerEvent,
};

pub use cli::{parse_args, CliError, Display, Invocation, OutputMode};
