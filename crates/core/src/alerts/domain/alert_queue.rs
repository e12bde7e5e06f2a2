use thiserror::Error;

use crate::shared::alert::Alert;

use super::statistics::AlertStatistics;

#[derive(Error, Debug)]
pub enum AlertPipelineError {
    #[error("alert worker is already running")]
    AlreadyRunning,
    #[error("failed to spawn alert worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("alert worker did not stop within {0:.1}s")]
    StopTimeout(f64),
    #[error("alert worker panicked")]
    WorkerPanicked,
}

/// Non-blocking hand-off point between the frame loop and alert processing.
pub trait AlertQueue: Send {
    /// Submits an alert for asynchronous processing. Returns `false` when
    /// the alert was dropped because the queue stayed full past the enqueue
    /// timeout.
    fn log_alert(&self, alert: Alert) -> bool;

    /// Snapshot of the counters; consistent as of the call.
    fn statistics(&self) -> AlertStatistics;

    /// Stops processing. Calling it more than once is harmless.
    fn shutdown(&mut self) -> Result<(), AlertPipelineError>;
}
