//! Phase sequencer for the Pomodoro Timer.
//!
//! This module drives the endless work/break cycle:
//! - Phase selection (Work → Break → ... → Long Break → Work)
//! - Optional confirmation gate before each phase
//! - Countdown of each phase with pause/resume
//! - Event firing for rendering

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::Duration;

use super::countdown::{run_countdown, TICK_PERIOD};
use super::event::TimerEvent;
use super::input::PauseSignals;
use crate::types::{Phase, PomodoroConfig, SequencerState};

// ============================================================================
// PhaseSequencer
// ============================================================================

/// Owns the cycle state and runs one phase after another.
pub struct PhaseSequencer {
    /// Immutable timer configuration
    config: PomodoroConfig,
    /// Cycle state, mutated once per completed phase
    state: SequencerState,
    /// Pause/confirmation input
    signals: PauseSignals,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Status ticker period
    tick_period: Duration,
}

impl PhaseSequencer {
    /// Creates a sequencer in the initial state (work slot, counter 0).
    pub fn new(
        config: PomodoroConfig,
        signals: PauseSignals,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            config,
            state: SequencerState::new(),
            signals,
            event_tx,
            tick_period: TICK_PERIOD,
        }
    }

    /// Overrides the status ticker period.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is zero.
    pub fn with_tick_period(mut self, period: Duration) -> Result<Self> {
        anyhow::ensure!(!period.is_zero(), "Tick period must be greater than zero");
        self.tick_period = period;
        Ok(self)
    }

    /// Runs phases forever.
    ///
    /// Only returns if events can no longer be delivered.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.run_phase().await?;
        }
    }

    /// Runs the next phase to completion and returns it.
    pub async fn run_phase(&mut self) -> Result<Phase> {
        let phase = self.state.next_phase(self.config.loops);
        let duration = self.config.duration_for(phase);

        if self.config.confirm {
            self.event_tx
                .send(TimerEvent::AwaitingConfirmation { phase })
                .context("Failed to send confirmation event")?;
            self.signals.next().await;
        }

        tracing::info!(phase = phase.label(), ?duration, "Starting phase");
        self.event_tx
            .send(TimerEvent::PhaseStarted {
                phase,
                duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            })
            .context("Failed to send phase started event")?;

        run_countdown(
            phase,
            duration,
            self.tick_period,
            &mut self.signals,
            &self.event_tx,
        )
        .await?;

        self.state.complete(phase);
        tracing::info!(
            phase = phase.label(),
            cycle_count = self.state.cycle_count,
            "Phase complete"
        );
        self.event_tx
            .send(TimerEvent::PhaseCompleted {
                phase,
                cycle_count: self.state.cycle_count,
            })
            .context("Failed to send phase completed event")?;

        Ok(phase)
    }

    /// Returns the current cycle state.
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::input::PauseSignal;
    use tokio::sync::mpsc::UnboundedSender;
    use tokio::time::{timeout, Instant};

    fn create_sequencer(
        config: PomodoroConfig,
    ) -> (
        PhaseSequencer,
        UnboundedSender<PauseSignal>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (signal_tx, signals) = PauseSignals::channel();
        let sequencer = PhaseSequencer::new(config, signals, event_tx);
        (sequencer, signal_tx, event_rx)
    }

    fn fast_config(loops: u32) -> PomodoroConfig {
        PomodoroConfig::new(Duration::from_secs(2), Duration::from_secs(1)).with_loops(loops)
    }

    // ------------------------------------------------------------------------
    // Sequencing Tests
    // ------------------------------------------------------------------------

    mod sequencing_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_new_sequencer() {
            let (sequencer, _signal_tx, _rx) = create_sequencer(PomodoroConfig::default());
            assert_eq!(sequencer.state(), &SequencerState::new());
            assert_eq!(sequencer.config().loops, 3);
        }

        #[tokio::test(start_paused = true)]
        async fn test_phase_order_with_default_loops() {
            let (mut sequencer, _signal_tx, _rx) = create_sequencer(fast_config(3));

            let mut phases = Vec::new();
            for _ in 0..8 {
                phases.push(sequencer.run_phase().await.unwrap());
            }

            use Phase::{Break, LongBreak, Work};
            assert_eq!(
                phases,
                vec![Work, Break, Work, Break, Work, LongBreak, Work, Break]
            );
            assert_eq!(sequencer.state().cycle_count, 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_single_loop_alternates_work_and_long_break() {
            let config = PomodoroConfig::from_minutes(0.01, 0.01, None, 1, false).unwrap();
            let (mut sequencer, _signal_tx, _rx) = create_sequencer(config);

            let mut phases = Vec::new();
            for _ in 0..6 {
                phases.push(sequencer.run_phase().await.unwrap());
            }

            for pair in phases.windows(2) {
                assert_ne!(pair[0].is_break(), pair[1].is_break());
            }
            assert!(phases
                .iter()
                .filter(|p| p.is_break())
                .all(|p| *p == Phase::LongBreak));
        }

        #[tokio::test(start_paused = true)]
        async fn test_phase_uses_configured_duration() {
            let config = fast_config(3).with_long_break(Duration::from_secs(7));
            let (mut sequencer, _signal_tx, _rx) = create_sequencer(config);

            let mut elapsed = Vec::new();
            for _ in 0..6 {
                let start = Instant::now();
                sequencer.run_phase().await.unwrap();
                elapsed.push(start.elapsed().as_secs());
            }

            assert_eq!(elapsed, vec![2, 1, 2, 1, 2, 7]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_events_for_one_phase() {
            let (mut sequencer, _signal_tx, mut rx) = create_sequencer(fast_config(3));

            sequencer.run_phase().await.unwrap();

            let mut events = Vec::new();
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
            assert_eq!(
                events,
                vec![
                    TimerEvent::PhaseStarted {
                        phase: Phase::Work,
                        duration_ms: 2000
                    },
                    TimerEvent::Tick {
                        phase: Phase::Work,
                        remaining_seconds: 1
                    },
                    TimerEvent::Tick {
                        phase: Phase::Work,
                        remaining_seconds: 0
                    },
                    TimerEvent::PhaseCompleted {
                        phase: Phase::Work,
                        cycle_count: 1
                    },
                ]
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_long_break_resets_counter_on_completion() {
            let (mut sequencer, _signal_tx, _rx) = create_sequencer(fast_config(2));

            // Work, Break, Work
            for _ in 0..3 {
                sequencer.run_phase().await.unwrap();
            }
            assert_eq!(sequencer.state().cycle_count, 2);

            assert_eq!(sequencer.run_phase().await.unwrap(), Phase::LongBreak);
            assert_eq!(sequencer.state().cycle_count, 0);
            assert_eq!(sequencer.state().phase, Phase::Work);
        }

        #[tokio::test(start_paused = true)]
        async fn test_sub_second_tick_period() {
            let config = PomodoroConfig::new(Duration::from_secs(1), Duration::from_secs(1));
            let (sequencer, _signal_tx, mut rx) = create_sequencer(config);
            let mut sequencer = sequencer
                .with_tick_period(Duration::from_millis(250))
                .unwrap();

            let start = Instant::now();
            sequencer.run_phase().await.unwrap();
            assert_eq!(start.elapsed(), Duration::from_secs(1));

            let mut remaining = Vec::new();
            while let Ok(event) = rx.try_recv() {
                if let TimerEvent::Tick {
                    remaining_seconds, ..
                } = event
                {
                    remaining.push(remaining_seconds);
                }
            }
            assert_eq!(remaining, vec![1, 1, 0, 0]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_zero_tick_period_rejected() {
            let (sequencer, _signal_tx, _rx) = create_sequencer(PomodoroConfig::default());

            let result = sequencer.with_tick_period(Duration::ZERO);
            assert!(result.is_err());
            assert!(result
                .err()
                .unwrap()
                .to_string()
                .contains("greater than zero"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_stops_when_renderer_is_gone() {
            let (mut sequencer, _signal_tx, rx) = create_sequencer(fast_config(3));
            drop(rx);

            assert!(sequencer.run().await.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Confirmation Gate Tests
    // ------------------------------------------------------------------------

    mod confirmation_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_confirmed_phase_starts_without_delay() {
            let config = fast_config(3).with_confirm(true);
            let (mut sequencer, signal_tx, mut rx) = create_sequencer(config);
            signal_tx.send(PauseSignal).unwrap();

            let start = Instant::now();
            assert_eq!(sequencer.run_phase().await.unwrap(), Phase::Work);
            assert_eq!(start.elapsed(), Duration::from_secs(2));

            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::AwaitingConfirmation { phase: Phase::Work }
            );
            assert!(matches!(
                rx.try_recv().unwrap(),
                TimerEvent::PhaseStarted {
                    phase: Phase::Work,
                    ..
                }
            ));
        }

        #[tokio::test(start_paused = true)]
        async fn test_unconfirmed_phase_never_starts() {
            let config = fast_config(3).with_confirm(true);
            let (mut sequencer, _signal_tx, mut rx) = create_sequencer(config);

            let result = timeout(Duration::from_secs(24 * 3600), sequencer.run_phase()).await;
            assert!(result.is_err());

            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::AwaitingConfirmation { phase: Phase::Work }
            );
            assert!(rx.try_recv().is_err());
            assert_eq!(sequencer.state(), &SequencerState::new());
        }

        #[tokio::test(start_paused = true)]
        async fn test_closed_input_blocks_confirmation() {
            let config = fast_config(3).with_confirm(true);
            let (mut sequencer, signal_tx, _rx) = create_sequencer(config);
            drop(signal_tx);

            let result = timeout(Duration::from_secs(3600), sequencer.run_phase()).await;
            assert!(result.is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_each_phase_requires_its_own_confirmation() {
            let config = fast_config(3).with_confirm(true);
            let (mut sequencer, signal_tx, _rx) = create_sequencer(config);
            signal_tx.send(PauseSignal).unwrap();

            sequencer.run_phase().await.unwrap();
            let result = timeout(Duration::from_secs(3600), sequencer.run_phase()).await;
            assert!(result.is_err());
            assert_eq!(sequencer.state().phase, Phase::Break);
        }
    }
}
