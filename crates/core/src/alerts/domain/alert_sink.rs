use std::path::PathBuf;

use thiserror::Error;

use super::alert_record::AlertRecord;

#[derive(Error, Debug)]
pub enum AlertLogError {
    #[error("failed to write alert log {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize alert record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable destination for admitted alerts.
///
/// Called only from the alert worker thread, one record at a time, in
/// dequeue order.
pub trait AlertSink: Send {
    fn append(&mut self, record: &AlertRecord) -> Result<(), AlertLogError>;
}
