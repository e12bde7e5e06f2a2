use serde::Deserialize;

use workplace_monitor_core::shared::frame_size::FrameSize;
use workplace_monitor_core::tracking::domain::detection::Detection;

/// One line of a recorded detection stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameRecord {
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl FrameRecord {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Same frame, no detections. Stands in for an unreadable line.
    pub fn without_detections(&self) -> Self {
        Self {
            detections: Vec::new(),
            ..self.clone()
        }
    }

    /// Drops detections below `min_confidence`.
    pub fn retain_confident(&mut self, min_confidence: f64) {
        self.detections.retain(|d| d.confidence >= min_confidence);
    }
}
