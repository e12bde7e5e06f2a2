use chrono::{DateTime, Local};

use crate::shared::alert::Alert;

use super::priority::Priority;

/// Real-time channel for admitted alerts (console, GUI, pager).
///
/// Runs on the alert worker thread before the record is persisted.
pub trait AlertNotifier: Send {
    fn notify(&mut self, alert: &Alert, priority: Priority, occurrence: u32);
}

/// Discards all notifications.
pub struct NullAlertNotifier;

impl AlertNotifier for NullAlertNotifier {
    fn notify(&mut self, _alert: &Alert, _priority: Priority, _occurrence: u32) {}
}

/// Emits one log line per admitted alert; high priority goes to `warn`.
pub struct LogAlertNotifier;

impl AlertNotifier for LogAlertNotifier {
    fn notify(&mut self, alert: &Alert, priority: Priority, occurrence: u32) {
        let message = format_notification(alert, priority, occurrence, Local::now());
        match priority {
            Priority::High => log::warn!("{message}"),
            Priority::Medium | Priority::Low => log::info!("{message}"),
        }
    }
}

/// `[HH:MM:SS] <PRIORITY> ALERT: <type> (Person <id>) - Occurrence #<n>`
pub fn format_notification(
    alert: &Alert,
    priority: Priority,
    occurrence: u32,
    at: DateTime<Local>,
) -> String {
    let person = alert
        .person_id
        .map_or_else(|| "N/A".to_string(), |id| id.to_string());
    format!(
        "[{}] {priority} ALERT: {} (Person {person}) - Occurrence #{occurrence}",
        at.format("%H:%M:%S"),
        alert.kind,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 9, 5, 3).unwrap()
    }

    #[test]
    fn test_person_alert_message() {
        let alert = Alert::idle(12, 130.0, 0.0);
        assert_eq!(
            format_notification(&alert, Priority::Low, 1, at()),
            "[09:05:03] LOW_PRIORITY ALERT: IDLE (Person 12) - Occurrence #1"
        );
    }

    #[test]
    fn test_crowd_alert_has_no_person() {
        let alert = Alert::crowd(5, 0.0);
        let message = format_notification(&alert, Priority::High, 1, at());
        assert!(message.contains("(Person N/A)"));
        assert!(message.contains("HIGH_PRIORITY ALERT: CROWD_DETECTED"));
    }

    #[test]
    fn test_notifiers_do_not_panic() {
        let alert = Alert::crowd(3, 0.0);
        NullAlertNotifier.notify(&alert, Priority::High, 1);
        LogAlertNotifier.notify(&alert, Priority::High, 1);
    }
}
