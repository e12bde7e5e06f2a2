use std::fmt;

use serde::{Deserialize, Serialize};

/// Every alert type the monitor knows how to prioritize.
///
/// Names outside this table travel as `Other` and are still processed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertKind {
    Idle,
    SuspiciousStanding,
    CrowdDetected,
    RestrictedAreaBreach,
    UnauthorizedAccess,
    ViolenceDetected,
    WeaponDetected,
    Loitering,
    UnusualBehavior,
    NormalActivity,
    Other(String),
}

impl AlertKind {
    pub fn as_str(&self) -> &str {
        match self {
            AlertKind::Idle => "IDLE",
            AlertKind::SuspiciousStanding => "SUSPICIOUS_STANDING",
            AlertKind::CrowdDetected => "CROWD_DETECTED",
            AlertKind::RestrictedAreaBreach => "RESTRICTED_AREA_BREACH",
            AlertKind::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            AlertKind::ViolenceDetected => "VIOLENCE_DETECTED",
            AlertKind::WeaponDetected => "WEAPON_DETECTED",
            AlertKind::Loitering => "LOITERING",
            AlertKind::UnusualBehavior => "UNUSUAL_BEHAVIOR",
            AlertKind::NormalActivity => "NORMAL_ACTIVITY",
            AlertKind::Other(name) => name,
        }
    }

    /// Kinds suppressed by a global cooldown rather than per-identity counting.
    pub fn is_globally_scoped(&self) -> bool {
        matches!(self, AlertKind::CrowdDetected)
    }
}

impl From<&str> for AlertKind {
    fn from(name: &str) -> Self {
        match name {
            "IDLE" => AlertKind::Idle,
            "SUSPICIOUS_STANDING" => AlertKind::SuspiciousStanding,
            "CROWD_DETECTED" => AlertKind::CrowdDetected,
            "RESTRICTED_AREA_BREACH" => AlertKind::RestrictedAreaBreach,
            "UNAUTHORIZED_ACCESS" => AlertKind::UnauthorizedAccess,
            "VIOLENCE_DETECTED" => AlertKind::ViolenceDetected,
            "WEAPON_DETECTED" => AlertKind::WeaponDetected,
            "LOITERING" => AlertKind::Loitering,
            "UNUSUAL_BEHAVIOR" => AlertKind::UnusualBehavior,
            "NORMAL_ACTIVITY" => AlertKind::NormalActivity,
            other => AlertKind::Other(other.to_string()),
        }
    }
}

impl From<String> for AlertKind {
    fn from(name: String) -> Self {
        AlertKind::from(name.as_str())
    }
}

impl From<AlertKind> for String {
    fn from(kind: AlertKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable behavioral or zone event.
///
/// `timestamp` is seconds on the same clock the frame loop supplies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub person_id: Option<u32>,
    pub count: Option<usize>,
    pub duration: Option<f64>,
    pub details: Option<String>,
    pub timestamp: f64,
}

impl Alert {
    pub fn new(kind: AlertKind, timestamp: f64) -> Self {
        Self {
            kind,
            person_id: None,
            count: None,
            duration: None,
            details: None,
            timestamp,
        }
    }

    pub fn idle(person_id: u32, idle_secs: f64, timestamp: f64) -> Self {
        Self {
            person_id: Some(person_id),
            duration: Some(round_centis(idle_secs)),
            ..Self::new(AlertKind::Idle, timestamp)
        }
    }

    pub fn suspicious_standing(person_id: u32, present_secs: f64, timestamp: f64) -> Self {
        Self {
            person_id: Some(person_id),
            duration: Some(round_centis(present_secs)),
            ..Self::new(AlertKind::SuspiciousStanding, timestamp)
        }
    }

    pub fn crowd(count: usize, timestamp: f64) -> Self {
        Self {
            count: Some(count),
            ..Self::new(AlertKind::CrowdDetected, timestamp)
        }
    }

    pub fn restricted_area_breach(person_id: u32, details: String, timestamp: f64) -> Self {
        Self {
            person_id: Some(person_id),
            details: Some(details),
            ..Self::new(AlertKind::RestrictedAreaBreach, timestamp)
        }
    }
}

fn round_centis(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("IDLE", AlertKind::Idle)]
    #[case("CROWD_DETECTED", AlertKind::CrowdDetected)]
    #[case("RESTRICTED_AREA_BREACH", AlertKind::RestrictedAreaBreach)]
    #[case("LOITERING", AlertKind::Loitering)]
    fn test_kind_names_round_trip(#[case] name: &str, #[case] kind: AlertKind) {
        assert_eq!(AlertKind::from(name), kind);
        assert_eq!(kind.as_str(), name);
    }

    #[test]
    fn test_unknown_name_is_other() {
        let kind = AlertKind::from("FIRE_DETECTED");
        assert_eq!(kind, AlertKind::Other("FIRE_DETECTED".to_string()));
        assert_eq!(kind.to_string(), "FIRE_DETECTED");
    }

    #[test]
    fn test_only_crowd_is_globally_scoped() {
        assert!(AlertKind::CrowdDetected.is_globally_scoped());
        assert!(!AlertKind::Idle.is_globally_scoped());
        assert!(!AlertKind::RestrictedAreaBreach.is_globally_scoped());
    }

    #[test]
    fn test_idle_duration_rounded() {
        let alert = Alert::idle(3, 121.23456, 10.0);
        assert_eq!(alert.kind, AlertKind::Idle);
        assert_eq!(alert.person_id, Some(3));
        assert_relative_eq!(alert.duration.unwrap(), 121.23);
    }

    #[test]
    fn test_crowd_has_no_person() {
        let alert = Alert::crowd(4, 10.0);
        assert_eq!(alert.person_id, None);
        assert_eq!(alert.count, Some(4));
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let json = serde_json::to_value(Alert::crowd(3, 1.0)).unwrap();
        assert_eq!(json["type"], "CROWD_DETECTED");
        assert_eq!(json["count"], 3);
    }
}
