use std::collections::HashMap;

use crate::shared::alert::AlertKind;
use crate::shared::bounding_box::Point;

/// Movement and alert bookkeeping for one tracked identity.
///
/// Invariant: `first_seen <= last_move_time <= ` the latest observed
/// timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonHistory {
    pub last_position: Point,
    pub last_move_time: f64,
    pub first_seen: f64,
    last_alert_time: HashMap<AlertKind, f64>,
}

impl PersonHistory {
    pub fn new(position: Point, timestamp: f64) -> Self {
        Self {
            last_position: position,
            last_move_time: timestamp,
            first_seen: timestamp,
            last_alert_time: HashMap::new(),
        }
    }

    /// Records movement if `position` is farther than `threshold` from the
    /// last recorded position. Returns whether the person moved.
    pub fn observe(&mut self, position: Point, timestamp: f64, threshold: f64) -> bool {
        if position.distance_to(&self.last_position) > threshold {
            self.last_position = position;
            self.last_move_time = timestamp;
            true
        } else {
            false
        }
    }

    pub fn idle_time(&self, timestamp: f64) -> f64 {
        timestamp - self.last_move_time
    }

    pub fn total_time(&self, timestamp: f64) -> f64 {
        timestamp - self.first_seen
    }

    /// True when `kind` has never fired for this person or fired more
    /// than `cooldown` seconds before `now`.
    pub fn can_alert(&self, kind: &AlertKind, now: f64, cooldown: f64) -> bool {
        self.last_alert_time
            .get(kind)
            .map_or(true, |last| now - last > cooldown)
    }

    pub fn mark_alerted(&mut self, kind: AlertKind, now: f64) {
        self.last_alert_time.insert(kind, now);
    }

    pub fn last_alert_time(&self, kind: &AlertKind) -> Option<f64> {
        self.last_alert_time.get(kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_history_seeds_times() {
        let h = PersonHistory::new(Point::new(10, 10), 5.0);
        assert_eq!(h.first_seen, 5.0);
        assert_eq!(h.last_move_time, 5.0);
        assert_relative_eq!(h.idle_time(8.0), 3.0);
        assert_relative_eq!(h.total_time(8.0), 3.0);
    }

    #[test]
    fn test_small_displacement_is_not_movement() {
        let mut h = PersonHistory::new(Point::new(10, 10), 0.0);
        assert!(!h.observe(Point::new(13, 14), 2.0, 5.0)); // exactly 5 px
        assert_eq!(h.last_position, Point::new(10, 10));
        assert_eq!(h.last_move_time, 0.0);
    }

    #[test]
    fn test_large_displacement_updates_position() {
        let mut h = PersonHistory::new(Point::new(10, 10), 0.0);
        assert!(h.observe(Point::new(20, 10), 2.0, 5.0));
        assert_eq!(h.last_position, Point::new(20, 10));
        assert_eq!(h.last_move_time, 2.0);
        assert_eq!(h.first_seen, 0.0);
    }

    #[test]
    fn test_drift_measured_from_last_move() {
        // Slow drift accumulates against the last recorded position.
        let mut h = PersonHistory::new(Point::new(0, 0), 0.0);
        assert!(!h.observe(Point::new(3, 0), 1.0, 5.0));
        assert!(h.observe(Point::new(6, 0), 2.0, 5.0));
        assert_eq!(h.last_move_time, 2.0);
    }

    #[test]
    fn test_cooldown_per_kind() {
        let mut h = PersonHistory::new(Point::new(0, 0), 0.0);
        assert!(h.can_alert(&AlertKind::Idle, 100.0, 10.0));

        h.mark_alerted(AlertKind::Idle, 100.0);
        assert!(!h.can_alert(&AlertKind::Idle, 105.0, 10.0));
        assert!(!h.can_alert(&AlertKind::Idle, 110.0, 10.0));
        assert!(h.can_alert(&AlertKind::Idle, 110.5, 10.0));
        assert!(h.can_alert(&AlertKind::SuspiciousStanding, 105.0, 10.0));
        assert_eq!(h.last_alert_time(&AlertKind::Idle), Some(100.0));
    }
}
