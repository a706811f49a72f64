//! Pomodoro Timer CLI - a terminal productivity tool
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - a long break after every few work sessions
//!
//! Press Return during a phase to pause or resume it.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use tokio::sync::mpsc;

use pomoloop::cli::{parse_args, Cli, CliError, Display, Invocation, OutputMode};
use pomoloop::timer::{spawn_input_listener, PauseSignals, PhaseSequencer, TimerEvent};
use pomoloop::types::PomodoroConfig;

/// Exit code used when interrupted with Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let invocation = match parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            // clap renders its own help and error text
            if matches!(e, CliError::Usage(_) | CliError::InvalidFlag(_)) {
                eprint!("{}", e);
            } else {
                Display::show_error(e.to_string().trim_end());
            }
            std::process::exit(e.exit_code());
        }
    };

    match invocation {
        Invocation::Completions(shell) => generate_completions(shell),
        Invocation::Run {
            config,
            output,
            verbose,
        } => {
            init_tracing(verbose);

            if let Err(e) = execute(config, output).await {
                Display::show_error(&e.to_string());
                std::process::exit(1);
            }
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries the timer display.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Runs the timer until interrupted.
async fn execute(config: PomodoroConfig, output: OutputMode) -> Result<()> {
    tracing::debug!(?config, "Configuration loaded");
    if output == OutputMode::Text {
        print!("{}", Display::banner(&config));
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(event_rx, output));

    let (signal_tx, signals) = PauseSignals::channel();
    spawn_input_listener(tokio::io::BufReader::new(tokio::io::stdin()), signal_tx);

    let mut sequencer = PhaseSequencer::new(config, signals, event_tx);

    tokio::select! {
        result = sequencer.run() => {
            printer.abort();
            result
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, exiting");
            println!();
            // The stdin reader holds a blocking thread; exit without
            // waiting for runtime shutdown.
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

/// Consumes timer events and writes them to stdout.
async fn print_events(mut event_rx: mpsc::UnboundedReceiver<TimerEvent>, output: OutputMode) {
    let stdout = io::stdout();
    while let Some(event) = event_rx.recv().await {
        if let Err(e) = Display::write_event(&mut stdout.lock(), output, &event) {
            tracing::warn!(error = %e, "Failed to write timer output");
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
