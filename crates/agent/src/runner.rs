//! Plays an event script into a channel with the configured pacing.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use modeler_core::config::StreamConfig;

use crate::events::StreamEvent;
use crate::plan::{Emission, Pacing};

/// How a scripted stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { emitted: usize },
    /// The receiving side went away before the script finished.
    Disconnected { emitted: usize },
}

impl RunOutcome {
    pub fn emitted(&self) -> usize {
        match *self {
            RunOutcome::Completed { emitted } | RunOutcome::Disconnected { emitted } => emitted,
        }
    }
}

fn delay_for(pacing: Pacing, config: &StreamConfig) -> Duration {
    match pacing {
        Pacing::None => Duration::ZERO,
        Pacing::Chunk => config.chunk_delay(),
        Pacing::Row => config.row_delay(),
    }
}

/// Send every emission in order, sleeping after paced ones.
///
/// The channel receiver is owned by the HTTP response body, so a closed
/// channel means the client disconnected. That is checked before every
/// narration chunk and row, and any failed send also ends the run.
pub async fn play(
    script: Vec<Emission>,
    config: &StreamConfig,
    tx: &mpsc::Sender<StreamEvent>,
) -> RunOutcome {
    let mut emitted = 0;
    for emission in script {
        if emission.checks_disconnect() && tx.is_closed() {
            debug!(emitted, "client disconnected, stopping stream");
            return RunOutcome::Disconnected { emitted };
        }

        let delay = delay_for(emission.pacing, config);
        if tx.send(emission.event).await.is_err() {
            debug!(emitted, "stream receiver dropped");
            return RunOutcome::Disconnected { emitted };
        }
        emitted += 1;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    RunOutcome::Completed { emitted }
}
