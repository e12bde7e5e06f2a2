use serde::Serialize;

use super::priority::Priority;

/// Running counters for the alert pipeline.
///
/// `total_alerts` counts every alert the worker dequeued, so
/// `total_alerts == high + medium + low + duplicates_filtered`. Alerts
/// dropped before reaching the queue are counted only in `dropped_alerts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertStatistics {
    pub total_alerts: u64,
    pub high_priority: u64,
    pub medium_priority: u64,
    pub low_priority: u64,
    pub duplicates_filtered: u64,
    pub dropped_alerts: u64,
}

impl AlertStatistics {
    pub fn record_admitted(&mut self, priority: Priority) {
        self.total_alerts += 1;
        match priority {
            Priority::High => self.high_priority += 1,
            Priority::Medium => self.medium_priority += 1,
            Priority::Low => self.low_priority += 1,
        }
    }

    pub fn record_duplicate(&mut self) {
        self.total_alerts += 1;
        self.duplicates_filtered += 1;
    }

    pub fn record_dropped(&mut self) {
        self.dropped_alerts += 1;
    }

    pub fn admitted(&self) -> u64 {
        self.high_priority + self.medium_priority + self.low_priority
    }
}
