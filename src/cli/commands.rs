//! Command definitions for the Pomodoro Timer CLI.
//!
//! Two surfaces are accepted:
//! - Flags (`-work 45 -break 7.5 -lb 22 -loops 5 -confirm`), parsed with
//!   clap derive after single-dash long flags are normalized
//! - Positional arguments (`25m 5m [1|0]`) with duration literals

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use super::duration::parse_duration;
use super::error::CliError;
use crate::types::{PomodoroConfig, DEFAULT_LOOPS};

// ============================================================================
// CLI Structure
// ============================================================================

/// A terminal Pomodoro timer.
#[derive(Parser, Debug)]
#[command(
    name = "pomoloop",
    version,
    about = "A simple Pomodoro app.",
    after_help = "Example Usage:\n  \
                  pomoloop -work 25 -break 5 -loops 6 -confirm\n  \
                  pomoloop -w 45 -b 7.5 -lb 22 -l 5 -c\n  \
                  pomoloop 25m 5m 1"
)]
pub struct Cli {
    /// Work time in minutes
    #[arg(short = 'w', long = "work", default_value_t = 25.0, value_name = "MINUTES")]
    pub work: f64,

    /// Break time in minutes
    #[arg(short = 'b', long = "break", default_value_t = 5.0, value_name = "MINUTES")]
    pub break_minutes: f64,

    /// Long break time in minutes (default: 2x break time)
    #[arg(long = "longbreak", visible_alias = "lb", value_name = "MINUTES")]
    pub long_break: Option<f64>,

    /// Number of work sessions before a long break
    #[arg(short = 'l', long = "loops", default_value_t = DEFAULT_LOOPS, value_name = "COUNT")]
    pub loops: u32,

    /// Confirm before starting the next phase
    #[arg(
        short = 'c',
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub confirm: bool,

    /// Print timer events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

// ============================================================================
// Invocation
// ============================================================================

/// How timer events are written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable status lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// What the binary should do after argument parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Run the timer
    Run {
        /// Timer configuration
        config: PomodoroConfig,
        /// Output format
        output: OutputMode,
        /// Debug logging
        verbose: bool,
    },
    /// Print a completion script
    Completions(clap_complete::Shell),
}

/// Long flag names accepted with a single leading dash.
const LONG_FLAGS: &[&str] = &[
    "work",
    "break",
    "longbreak",
    "lb",
    "loops",
    "confirm",
    "json",
    "verbose",
    "completions",
    "help",
    "version",
];

/// Rewrites `-work`/`-lb=22` style flags to their `--` form.
fn normalize_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    if let Some(rest) = text.strip_prefix('-') {
        if !rest.starts_with('-') {
            let name = rest.split('=').next().unwrap_or(rest);
            if LONG_FLAGS.contains(&name) {
                return OsString::from(format!("-{}", text));
            }
        }
    }
    arg
}

/// Parses the full argument list, program name included.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let positional = args
        .get(1)
        .and_then(|first| first.to_str())
        .is_some_and(|first| !first.starts_with('-'));
    if positional {
        return parse_positional(&args[1..]);
    }

    let normalized = args.into_iter().map(normalize_flag);
    let cli = Cli::try_parse_from(normalized).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            CliError::Usage(e.render().to_string())
        }
        _ => CliError::InvalidFlag(e.render().to_string()),
    })?;
    cli.into_invocation()
}

impl Cli {
    /// Validates parsed flags into an invocation.
    pub fn into_invocation(self) -> Result<Invocation, CliError> {
        if let Some(shell) = self.completions {
            return Ok(Invocation::Completions(shell));
        }

        let config = PomodoroConfig::from_minutes(
            self.work,
            self.break_minutes,
            self.long_break,
            self.loops,
            self.confirm,
        )?;
        Ok(Invocation::Run {
            config,
            output: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            },
            verbose: self.verbose,
        })
    }
}

// ============================================================================
// Positional Arguments
// ============================================================================

/// Returns the usage text for the positional surface.
pub fn positional_usage() -> String {
    let bin = Cli::command().get_name().to_string();
    format!(
        "Usage: {bin} <work-time> <break-time> [confirm]\n\n\
         Arguments:\n  \
         <work-time>   Work duration, e.g. 25m\n  \
         <break-time>  Break duration, e.g. 5m\n  \
         [confirm]     1 to confirm before each phase, 0 otherwise (default 0)\n\n\
         Run `{bin} --help` for the flag-based interface.\n"
    )
}

/// Parses `<work> <break> [1|0]`.
fn parse_positional(args: &[OsString]) -> Result<Invocation, CliError> {
    let usage = || CliError::Usage(positional_usage());

    let args: Vec<&str> = args
        .iter()
        .map(|arg| arg.to_str())
        .collect::<Option<_>>()
        .ok_or_else(usage)?;

    let (work, short_break, confirm) = match args.as_slice() {
        [work, short_break] => (*work, *short_break, false),
        [work, short_break, "1"] => (*work, *short_break, true),
        [work, short_break, "0"] => (*work, *short_break, false),
        _ => return Err(usage()),
    };

    let config = PomodoroConfig::new(parse_duration(work)?, parse_duration(short_break)?)
        .with_confirm(confirm);
    Ok(Invocation::Run {
        config,
        output: OutputMode::Text,
        verbose: false,
    })
}

// ============================================================================
// Tests
// ============================================================================
