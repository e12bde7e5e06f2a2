/// IoU-based multi-person tracker.
///
/// Matches each existing track (ascending id) against this frame's
/// detections by bounding-box overlap. The default greedy strategy is
/// order-dependent by nature; iterating in ascending id keeps results
/// reproducible. `MatchStrategy::Optimal` swaps in a global assignment
/// and may therefore pair tracks differently on crowded frames.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{DEFAULT_IOU_THRESHOLD, TRACKER_MAX_MISSING};
use crate::tracking::domain::detection::Detection;
use crate::tracking::domain::person_tracker::PersonTracker;
use crate::tracking::domain::track::Track;

use super::assignment::{greedy_assign, optimal_assign};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("assignment solver failed: {0}")]
    Assignment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Per-track best unmatched detection, scanned in ascending id.
    #[default]
    Greedy,
    /// Minimum total `1 - IoU` over all pairs (LAPJV).
    Optimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub iou_threshold: f64,
    pub max_missing: usize,
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            max_missing: TRACKER_MAX_MISSING,
            strategy: MatchStrategy::Greedy,
        }
    }
}

pub struct IouTracker {
    /// Always sorted by ascending id: new tracks get the highest id and
    /// are appended, removal preserves order.
    tracks: Vec<Track>,
    next_id: u32,
    config: TrackerConfig,
}

impl IouTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            config,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    fn assign(&self, detections: &[Detection]) -> Vec<Option<usize>> {
        let track_boxes: Vec<BoundingBox> = self.tracks.iter().map(|t| t.bbox).collect();
        let det_boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
        let threshold = self.config.iou_threshold;

        match self.config.strategy {
            MatchStrategy::Greedy => greedy_assign(&track_boxes, &det_boxes, threshold),
            MatchStrategy::Optimal => optimal_assign(&track_boxes, &det_boxes, threshold)
                .unwrap_or_else(|e| {
                    log::warn!("{e}; falling back to greedy matching for this frame");
                    greedy_assign(&track_boxes, &det_boxes, threshold)
                }),
        }
    }

    fn apply_matches(&mut self, assignment: &[Option<usize>], detections: &[Detection], now: f64) {
        for (track, slot) in self.tracks.iter_mut().zip(assignment) {
            match slot {
                Some(di) => track.observe(&detections[*di], now),
                None => track.missing_count += 1,
            }
        }
    }

    fn drop_expired(&mut self) {
        let max_missing = self.config.max_missing;
        self.tracks.retain(|t| {
            let keep = t.missing_count <= max_missing;
            if !keep {
                log::debug!("Track {} removed after {} missed frames", t.id, t.missing_count);
            }
            keep
        });
    }

    fn create_new_tracks(&mut self, assignment: &[Option<usize>], detections: &[Detection], now: f64) {
        let mut claimed = vec![false; detections.len()];
        for di in assignment.iter().flatten() {
            claimed[*di] = true;
        }

        for (di, det) in detections.iter().enumerate() {
            if !claimed[di] {
                log::debug!("Track {} created", self.next_id);
                self.tracks.push(Track::new(self.next_id, det, now));
                self.next_id += 1;
            }
        }
    }
}

impl Default for IouTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl PersonTracker for IouTracker {
    fn update(&mut self, detections: &[Detection], now: f64) -> Vec<Track> {
        let assignment = self.assign(detections);
        self.apply_matches(&assignment, detections, now);
        self.drop_expired();
        self.create_new_tracks(&assignment, detections, now);

        self.tracks.clone()
    }
}
