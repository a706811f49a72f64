//! Pause signal producer and consumer.
//!
//! A single background task reads lines from standard input and pushes one
//! [`PauseSignal`] per line into an unbounded queue. The countdown and the
//! confirmation gate are the only consumers, so all state mutation stays on
//! one logical task.

use std::future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One completed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseSignal;

/// Spawns the input listener task.
///
/// The task ends on end of input or on a read error; dropping the sender
/// tells [`PauseSignals`] no further signals will arrive.
pub fn spawn_input_listener<R>(reader: R, tx: mpsc::UnboundedSender<PauseSignal>) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        // Raw bytes: any line counts, whatever its encoding.
        let mut lines = reader.split(b'\n');
        loop {
            match lines.next_segment().await {
                Ok(Some(_)) => {
                    if tx.send(PauseSignal).is_err() {
                        tracing::debug!("Pause signal receiver dropped, stopping input listener");
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!("Input closed, stopping input listener");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read input, pause disabled");
                    break;
                }
            }
        }
    })
}

/// Single-consumer end of the pause signal queue.
#[derive(Debug)]
pub struct PauseSignals {
    rx: mpsc::UnboundedReceiver<PauseSignal>,
    closed: bool,
}

impl PauseSignals {
    /// Wraps the receiving half of the signal channel.
    pub fn new(rx: mpsc::UnboundedReceiver<PauseSignal>) -> Self {
        Self { rx, closed: false }
    }

    /// Creates a connected sender/consumer pair.
    pub fn channel() -> (mpsc::UnboundedSender<PauseSignal>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }

    /// Waits for the next signal.
    ///
    /// Once the producer is gone this never resolves: the timer keeps
    /// running unattended and a confirmation gate blocks indefinitely.
    pub async fn next(&mut self) -> PauseSignal {
        if !self.closed {
            if let Some(signal) = self.rx.recv().await {
                return signal;
            }
            self.closed = true;
            tracing::warn!("No further input will be received; pause and confirm are unavailable");
        }
        future::pending().await
    }

    /// Returns true once the producer has been dropped and drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
