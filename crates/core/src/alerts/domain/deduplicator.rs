use std::collections::HashMap;

use crate::shared::alert::{Alert, AlertKind};
use crate::shared::constants::{DEFAULT_DEDUP_WINDOW_SECS, DEFAULT_GLOBAL_COOLDOWN_SECS};

use super::priority::Priority;

/// Identity of "the same alert": kind plus person. Count, duration and
/// details are deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub kind: AlertKind,
    pub person_id: Option<u32>,
}

impl From<&Alert> for DedupKey {
    fn from(alert: &Alert) -> Self {
        Self {
            kind: alert.kind.clone(),
            person_id: alert.person_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DedupEntry {
    last_seen: f64,
    occurrences: u32,
}

/// Outcome of a dedup check. `occurrence` is 0 for alerts swallowed by a
/// global cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupDecision {
    pub admitted: bool,
    pub occurrence: u32,
}

impl DedupDecision {
    fn admit(occurrence: u32) -> Self {
        Self {
            admitted: true,
            occurrence,
        }
    }
}

/// Suppresses alert spam with two independent mechanisms.
///
/// Globally scoped kinds (crowd alerts) pass at most once per
/// `global_cooldown`. Everything else is counted per key: repeats closer
/// than `time_window` to the previous occurrence increment the counter and
/// are admitted only up to the priority's quota; a longer gap starts a new
/// count. Time is the alert's own timestamp, so decisions replay
/// identically regardless of queueing delay.
pub struct AlertDeduplicator {
    time_window: f64,
    global_cooldown: f64,
    cache: HashMap<DedupKey, DedupEntry>,
    last_trigger: HashMap<AlertKind, f64>,
}

impl AlertDeduplicator {
    pub fn new(time_window: f64, global_cooldown: f64) -> Self {
        Self {
            time_window,
            global_cooldown,
            cache: HashMap::new(),
            last_trigger: HashMap::new(),
        }
    }

    pub fn check(&mut self, alert: &Alert) -> DedupDecision {
        let now = alert.timestamp;
        self.purge_expired(now);

        if alert.kind.is_globally_scoped() {
            self.check_cooldown(&alert.kind, now)
        } else {
            self.check_window(alert, now)
        }
    }

    /// Number of live sliding-window entries.
    pub fn cached_keys(&self) -> usize {
        self.cache.len()
    }

    fn check_cooldown(&mut self, kind: &AlertKind, now: f64) -> DedupDecision {
        if let Some(last) = self.last_trigger.get(kind) {
            if now - last < self.global_cooldown {
                return DedupDecision {
                    admitted: false,
                    occurrence: 0,
                };
            }
        }
        self.last_trigger.insert(kind.clone(), now);
        DedupDecision::admit(1)
    }

    fn check_window(&mut self, alert: &Alert, now: f64) -> DedupDecision {
        let key = DedupKey::from(alert);
        let quota = Priority::for_kind(&alert.kind).admission_quota();

        match self.cache.get_mut(&key) {
            Some(entry) if now - entry.last_seen < self.time_window => {
                entry.last_seen = now;
                entry.occurrences += 1;
                DedupDecision {
                    admitted: entry.occurrences <= quota,
                    occurrence: entry.occurrences,
                }
            }
            _ => {
                self.cache.insert(
                    key,
                    DedupEntry {
                        last_seen: now,
                        occurrences: 1,
                    },
                );
                DedupDecision::admit(1)
            }
        }
    }

    fn purge_expired(&mut self, now: f64) {
        let max_age = self.time_window * 2.0;
        self.cache.retain(|_, entry| now - entry.last_seen <= max_age);
    }
}

impl Default for AlertDeduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW_SECS, DEFAULT_GLOBAL_COOLDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle(person: u32, t: f64) -> Alert {
        Alert::idle(person, 130.0, t)
    }

    fn admitted_count(dedup: &mut AlertDeduplicator, alerts: &[Alert]) -> usize {
        alerts.iter().filter(|a| dedup.check(a).admitted).count()
    }

    #[test]
    fn test_first_occurrence_admitted() {
        let mut dedup = AlertDeduplicator::default();
        assert_eq!(dedup.check(&idle(1, 0.0)), DedupDecision::admit(1));
    }

    #[test]
    fn test_ten_crowd_alerts_within_cooldown_admit_one() {
        let mut dedup = AlertDeduplicator::default();
        let alerts: Vec<Alert> = (0..10).map(|i| Alert::crowd(3 + i, i as f64)).collect();
        assert_eq!(admitted_count(&mut dedup, &alerts), 1);
    }

    #[test]
    fn test_crowd_cooldown_drops_with_zero_occurrence() {
        let mut dedup = AlertDeduplicator::default();
        dedup.check(&Alert::crowd(3, 0.0));
        assert_eq!(
            dedup.check(&Alert::crowd(5, 10.0)),
            DedupDecision {
                admitted: false,
                occurrence: 0
            }
        );
    }

    #[test]
    fn test_crowd_cooldown_clock_advances_only_on_admit() {
        let mut dedup = AlertDeduplicator::default();
        assert!(dedup.check(&Alert::crowd(3, 0.0)).admitted);
        assert!(!dedup.check(&Alert::crowd(3, 29.0)).admitted);
        // Measured from t=0, not from the suppressed alert at t=29.
        assert!(dedup.check(&Alert::crowd(3, 30.0)).admitted);
    }

    #[test]
    fn test_ten_idle_alerts_within_window_admit_low_quota() {
        let mut dedup = AlertDeduplicator::default();
        let alerts: Vec<Alert> = (0..10).map(|i| idle(1, i as f64)).collect();
        assert_eq!(admitted_count(&mut dedup, &alerts), 1);
    }

    #[test]
    fn test_high_priority_quota() {
        let mut dedup = AlertDeduplicator::default();
        let alerts: Vec<Alert> = (0..10)
            .map(|i| Alert::restricted_area_breach(2, "1 people in Server Room".into(), i as f64))
            .collect();
        let decisions: Vec<DedupDecision> = alerts.iter().map(|a| dedup.check(a)).collect();

        assert_eq!(decisions.iter().filter(|d| d.admitted).count(), 5);
        assert_eq!(decisions[4], DedupDecision::admit(5));
        assert_eq!(decisions[5].occurrence, 6);
        assert!(!decisions[5].admitted);
    }

    #[test]
    fn test_medium_priority_quota() {
        let mut dedup = AlertDeduplicator::default();
        let alerts: Vec<Alert> = (0..6)
            .map(|i| Alert::suspicious_standing(4, 200.0, i as f64))
            .collect();
        assert_eq!(admitted_count(&mut dedup, &alerts), 3);
    }

    #[test]
    fn test_different_people_counted_separately() {
        let mut dedup = AlertDeduplicator::default();
        assert!(dedup.check(&idle(1, 0.0)).admitted);
        assert!(dedup.check(&idle(2, 0.5)).admitted);
        assert!(!dedup.check(&idle(1, 1.0)).admitted);
    }

    #[test]
    fn test_count_resets_after_quiet_window() {
        let mut dedup = AlertDeduplicator::default();
        assert!(dedup.check(&idle(1, 0.0)).admitted);
        assert!(!dedup.check(&idle(1, 20.0)).admitted);
        // 30 s since the last occurrence (t=20), not since the first.
        assert!(!dedup.check(&idle(1, 45.0)).admitted);
        assert_eq!(dedup.check(&idle(1, 75.0)), DedupDecision::admit(1));
    }

    #[test]
    fn test_stale_entries_purged() {
        let mut dedup = AlertDeduplicator::default();
        dedup.check(&idle(1, 0.0));
        dedup.check(&idle(2, 0.0));
        assert_eq!(dedup.cached_keys(), 2);

        dedup.check(&idle(3, 61.0));
        assert_eq!(dedup.cached_keys(), 1);
    }

    #[test]
    fn test_unknown_kind_uses_medium_quota() {
        let mut dedup = AlertDeduplicator::default();
        let alerts: Vec<Alert> = (0..5)
            .map(|i| Alert::new(AlertKind::Other("FIRE".into()), i as f64))
            .collect();
        assert_eq!(admitted_count(&mut dedup, &alerts), 3);
    }

    #[test]
    fn test_crowd_and_person_caches_independent() {
        let mut dedup = AlertDeduplicator::default();
        assert!(dedup.check(&Alert::crowd(3, 0.0)).admitted);
        assert!(dedup.check(&idle(1, 1.0)).admitted);
        assert!(!dedup.check(&Alert::crowd(3, 2.0)).admitted);
        assert_eq!(dedup.cached_keys(), 1);
    }
}
