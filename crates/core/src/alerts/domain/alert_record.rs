use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::shared::alert::Alert;

use super::priority::Priority;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted line of the alert log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp: String,
    pub priority: Priority,
    pub alert_type: String,
    pub person_id: Option<u32>,
    pub duration: Option<f64>,
    pub count: Option<usize>,
    pub details: Option<String>,
    pub occurrence_number: u32,
    pub persisted_at: String,
}

impl AlertRecord {
    pub fn new(
        alert: &Alert,
        priority: Priority,
        occurrence_number: u32,
        persisted_at: DateTime<Local>,
    ) -> Self {
        Self {
            timestamp: format_epoch(alert.timestamp),
            priority,
            alert_type: alert.kind.to_string(),
            person_id: alert.person_id,
            duration: alert.duration,
            count: alert.count,
            details: alert.details.clone(),
            occurrence_number,
            persisted_at: persisted_at.to_rfc3339(),
        }
    }
}

/// Formats epoch seconds as local wall-clock time. Timestamps chrono cannot
/// represent fall back to the raw seconds.
pub fn format_epoch(secs: f64) -> String {
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
        .map(|utc| utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| format!("{secs:.3}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_copies_alert_fields() {
        let alert = Alert::restricted_area_breach(7, "1 people in Server Room".into(), 0.0);
        let record = AlertRecord::new(&alert, Priority::High, 2, Local::now());

        assert_eq!(record.alert_type, "RESTRICTED_AREA_BREACH");
        assert_eq!(record.person_id, Some(7));
        assert_eq!(record.details.as_deref(), Some("1 people in Server Room"));
        assert_eq!(record.occurrence_number, 2);
        assert_eq!(record.count, None);
    }

    #[test]
    fn test_timestamp_is_local_wall_clock() {
        let local = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let secs = local.timestamp() as f64;
        assert_eq!(format_epoch(secs), "2024-03-05 14:07:09");
    }

    #[test]
    fn test_unrepresentable_timestamp_falls_back() {
        assert_eq!(format_epoch(f64::MAX), format!("{:.3}", f64::MAX));
    }

    #[test]
    fn test_serialized_field_names() {
        let alert = Alert::crowd(4, 0.0);
        let record = AlertRecord::new(&alert, Priority::High, 1, Local::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["priority"], "HIGH_PRIORITY");
        assert_eq!(json["alert_type"], "CROWD_DETECTED");
        assert_eq!(json["count"], 4);
        assert!(json["person_id"].is_null());
        assert_eq!(json["occurrence_number"], 1);
    }
}
