use serde::Serialize;

use crate::shared::bounding_box::{BoundingBox, Point};
use crate::tracking::domain::detection::Detection;

/// A persistent identity assigned across frames.
///
/// `timestamp` is the time of the last matched detection; it does not
/// advance while the track is missing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    pub id: u32,
    pub bbox: BoundingBox,
    pub center: Point,
    pub confidence: f64,
    pub timestamp: f64,
    pub missing_count: usize,
}

impl Track {
    pub fn new(id: u32, detection: &Detection, now: f64) -> Self {
        Self {
            id,
            bbox: detection.bbox,
            center: detection.bbox.center(),
            confidence: detection.confidence,
            timestamp: now,
            missing_count: 0,
        }
    }

    pub fn observe(&mut self, detection: &Detection, now: f64) {
        self.bbox = detection.bbox;
        self.center = detection.bbox.center();
        self.confidence = detection.confidence;
        self.timestamp = now;
        self.missing_count = 0;
    }

    pub fn observation(&self) -> TrackObservation {
        TrackObservation {
            id: self.id,
            center: self.center,
            timestamp: self.timestamp,
        }
    }
}

/// The slice of a track that downstream analyzers consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackObservation {
    pub id: u32,
    pub center: Point,
    pub timestamp: f64,
}

impl TrackObservation {
    pub fn new(id: u32, center: Point, timestamp: f64) -> Self {
        Self {
            id,
            center,
            timestamp,
        }
    }
}

impl From<&Track> for TrackObservation {
    fn from(track: &Track) -> Self {
        track.observation()
    }
}
