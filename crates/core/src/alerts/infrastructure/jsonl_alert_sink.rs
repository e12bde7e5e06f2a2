use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::alerts::domain::alert_record::AlertRecord;
use crate::alerts::domain::alert_sink::{AlertLogError, AlertSink};

/// Appends one JSON object per line, flushing after every record so the
/// file survives an abrupt exit.
pub struct JsonlAlertSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlAlertSink {
    /// Opens `<log_dir>/alerts_<YYYYmmdd_HHMMSS>.jsonl`, creating the
    /// directory if needed.
    pub fn create(log_dir: &Path) -> Result<Self, AlertLogError> {
        fs::create_dir_all(log_dir).map_err(|source| AlertLogError::Io {
            path: log_dir.to_path_buf(),
            source,
        })?;
        let name = format!("alerts_{}.jsonl", Local::now().format("%Y%m%d_%H%M%S"));
        Self::at_path(&log_dir.join(name))
    }

    /// Opens (or appends to) an explicit file.
    pub fn at_path(path: &Path) -> Result<Self, AlertLogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AlertLogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Alert log: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> AlertLogError {
        AlertLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AlertSink for JsonlAlertSink {
    fn append(&mut self, record: &AlertRecord) -> Result<(), AlertLogError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}").map_err(|e| self.io_error(e))?;
        self.writer.flush().map_err(|e| self.io_error(e))
    }
}
