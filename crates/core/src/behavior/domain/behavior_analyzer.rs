use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::shared::alert::{Alert, AlertKind};
use crate::shared::bounding_box::Point;
use crate::shared::constants::{
    DEFAULT_ALERT_COOLDOWN_SECS, DEFAULT_CROWD_COUNT, DEFAULT_CROWD_DISTANCE_PX,
    DEFAULT_IDLE_THRESHOLD_SECS, DEFAULT_MOVEMENT_THRESHOLD_PX, DEFAULT_OBSERVATION_WINDOW_SECS,
    DEFAULT_SUSPICIOUS_THRESHOLD_SECS,
};
use crate::tracking::domain::track::TrackObservation;

use super::crowd_detector::crowd_members;
use super::person_history::PersonHistory;

/// Tunables for behavior classification. Times in seconds, distances in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorThresholds {
    pub observation_window: f64,
    pub idle_threshold: f64,
    pub suspicious_threshold: f64,
    pub movement_threshold: f64,
    pub crowd_distance_threshold: f64,
    pub crowd_count_threshold: usize,
    pub alert_cooldown: f64,
}

impl Default for BehaviorThresholds {
    fn default() -> Self {
        Self {
            observation_window: DEFAULT_OBSERVATION_WINDOW_SECS,
            idle_threshold: DEFAULT_IDLE_THRESHOLD_SECS,
            suspicious_threshold: DEFAULT_SUSPICIOUS_THRESHOLD_SECS,
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD_PX,
            crowd_distance_threshold: DEFAULT_CROWD_DISTANCE_PX,
            crowd_count_threshold: DEFAULT_CROWD_COUNT,
            alert_cooldown: DEFAULT_ALERT_COOLDOWN_SECS,
        }
    }
}

/// Classifies tracked people into IDLE, SUSPICIOUS_STANDING and
/// CROWD_DETECTED alerts.
///
/// Owns per-id history for as long as the id keeps appearing in the input.
/// An id missing from a call is forgotten immediately, so a returning id
/// starts a fresh observation window. Single-writer: call from the frame
/// loop only.
pub struct BehaviorAnalyzer {
    thresholds: BehaviorThresholds,
    history: HashMap<u32, PersonHistory>,
}

impl BehaviorAnalyzer {
    pub fn new(thresholds: BehaviorThresholds) -> Self {
        Self {
            thresholds,
            history: HashMap::new(),
        }
    }

    pub fn thresholds(&self) -> &BehaviorThresholds {
        &self.thresholds
    }

    pub fn history(&self, id: u32) -> Option<&PersonHistory> {
        self.history.get(&id)
    }

    pub fn tracked_count(&self) -> usize {
        self.history.len()
    }

    /// Analyzes one frame's tracks. `now` drives the per-person cooldown
    /// and stamps emitted alerts; each track's own timestamp drives the
    /// idle and presence timers.
    pub fn analyse(&mut self, tracks: &[TrackObservation], now: f64) -> Vec<Alert> {
        self.forget_departed(tracks);

        let mut alerts = Vec::new();
        for track in tracks {
            self.analyse_person(track, now, &mut alerts);
        }

        let centers: Vec<(u32, Point)> = tracks.iter().map(|t| (t.id, t.center)).collect();
        let crowd = crowd_members(&centers, self.thresholds.crowd_distance_threshold);
        if crowd.len() >= self.thresholds.crowd_count_threshold {
            alerts.push(Alert::crowd(crowd.len(), now));
        }

        alerts
    }

    fn forget_departed(&mut self, tracks: &[TrackObservation]) {
        let active: HashSet<u32> = tracks.iter().map(|t| t.id).collect();
        self.history.retain(|id, _| active.contains(id));
    }

    fn analyse_person(&mut self, track: &TrackObservation, now: f64, alerts: &mut Vec<Alert>) {
        if !self.history.contains_key(&track.id) {
            // A single sighting is not enough to judge anything.
            self.history
                .insert(track.id, PersonHistory::new(track.center, track.timestamp));
            return;
        }
        let t = &self.thresholds;
        let Some(history) = self.history.get_mut(&track.id) else {
            return;
        };

        history.observe(track.center, track.timestamp, t.movement_threshold);

        let idle_time = history.idle_time(track.timestamp);
        let total_time = history.total_time(track.timestamp);
        if total_time < t.observation_window {
            return;
        }

        if idle_time >= t.idle_threshold && history.can_alert(&AlertKind::Idle, now, t.alert_cooldown)
        {
            alerts.push(Alert::idle(track.id, idle_time, now));
            history.mark_alerted(AlertKind::Idle, now);
        }

        if total_time >= t.suspicious_threshold
            && history.can_alert(&AlertKind::SuspiciousStanding, now, t.alert_cooldown)
        {
            alerts.push(Alert::suspicious_standing(track.id, total_time, now));
            history.mark_alerted(AlertKind::SuspiciousStanding, now);
        }
    }
}

impl Default for BehaviorAnalyzer {
    fn default() -> Self {
        Self::new(BehaviorThresholds::default())
    }
}
