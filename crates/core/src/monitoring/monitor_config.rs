use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alerts::infrastructure::threaded_alert_pipeline::AlertPipelineConfig;
use crate::behavior::domain::behavior_analyzer::BehaviorThresholds;
use crate::tracking::infrastructure::iou_tracker::TrackerConfig;
use crate::zones::domain::zone_spec::{default_zone_specs, ZoneSpec};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Complete monitor configuration. Every section and field is optional in
/// the JSON file; missing values take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub tracker: TrackerConfig,
    pub behavior: BehaviorThresholds,
    pub alerts: AlertPipelineConfig,
    pub zones: Vec<ZoneSpec>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            behavior: BehaviorThresholds::default(),
            alerts: AlertPipelineConfig::default(),
            zones: default_zone_specs(),
        }
    }
}

impl MonitorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
