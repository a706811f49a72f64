//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Flag and positional argument parsing
//! - `duration`: Duration literal parsing and formatting
//! - `display`: Output formatting and display logic
//! - `error`: CLI error types and exit codes

pub mod commands;
pub mod display;
pub mod duration;
pub mod error;

pub use commands::{parse_args, Cli, Invocation, OutputMode};
pub use display::Display;
pub use error::CliError;
