//! Timer module for the Pomodoro Timer.
//!
//! This module contains the core timer functionality:
//! - `engine`: Phase sequencer driving the work/break cycle
//! - `countdown`: Drift-free countdown with pause/resume
//! - `input`: Line-based pause signal producer
//! - `event`: Events emitted for rendering

pub mod countdown;
pub mod engine;
pub mod event;
pub mod input;

pub use countdown::{run_countdown, Countdown, TICK_PERIOD};
pub use engine::PhaseSequencer;
pub use event::TimerEvent;
pub use input::{spawn_input_listener, PauseSignal, PauseSignals};
