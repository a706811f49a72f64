//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The startup banner
//! - Timer events (phase announcements, status line, pause state)
//! - Error messages

use std::io::{self, Write};

use super::commands::OutputMode;
use super::duration::{format_duration, format_seconds};
use crate::timer::TimerEvent;
use crate::types::PomodoroConfig;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Returns the startup banner for a configuration.
    pub fn banner(config: &PomodoroConfig) -> String {
        format!(
            "Starting pomoloop with work time: {}, short break time {}, and long break time {}\n",
            format_duration(config.work),
            format_duration(config.short_break),
            format_duration(config.long_break)
        )
    }

    /// Renders an event as terminal text.
    ///
    /// Tick lines start with a carriage return and no newline so the status
    /// line is rewritten in place.
    pub fn render(event: &TimerEvent) -> String {
        match event {
            TimerEvent::AwaitingConfirmation { .. } => {
                "Confirming next stage, press Enter to continue...\n".to_string()
            }
            TimerEvent::PhaseStarted { phase, .. } => format!(
                "\nStarting {} phase.\nPress Return to pause the timer.\n",
                phase.label()
            ),
            TimerEvent::Tick {
                remaining_seconds, ..
            } => format!("\rTime remaining: {}  ", format_seconds(*remaining_seconds)),
            TimerEvent::Paused { .. } => "\nTimer paused. Press Return to resume.\n".to_string(),
            TimerEvent::Resumed { .. } => "Timer resumed.\n".to_string(),
            TimerEvent::PhaseCompleted { phase, .. } => {
                format!("\n{} complete.\x07\n", phase.label())
            }
        }
    }

    /// Renders an event as one JSON line.
    pub fn render_json(event: &TimerEvent) -> serde_json::Result<String> {
        serde_json::to_string(event).map(|mut line| {
            line.push('\n');
            line
        })
    }

    /// Writes an event to `out` in the requested format and flushes.
    pub fn write_event<W: Write>(out: &mut W, mode: OutputMode, event: &TimerEvent) -> io::Result<()> {
        let text = match mode {
            OutputMode::Text => Self::render(event),
            OutputMode::Json => Self::render_json(event)?,
        };
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        let _ = Self::write_error(&mut io::stderr().lock(), message);
    }

    /// Writes an error line to `out`.
    pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "Error: {}", message)
    }
}

// ============================================================================
// Tests
// ============================================================================
