use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::alert::AlertKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "HIGH_PRIORITY")]
    High,
    #[serde(rename = "MEDIUM_PRIORITY")]
    Medium,
    #[serde(rename = "LOW_PRIORITY")]
    Low,
}

impl Priority {
    pub fn for_kind(kind: &AlertKind) -> Self {
        match kind {
            AlertKind::CrowdDetected
            | AlertKind::RestrictedAreaBreach
            | AlertKind::UnauthorizedAccess
            | AlertKind::ViolenceDetected
            | AlertKind::WeaponDetected => Priority::High,
            AlertKind::SuspiciousStanding | AlertKind::Loitering | AlertKind::UnusualBehavior => {
                Priority::Medium
            }
            AlertKind::Idle | AlertKind::NormalActivity => Priority::Low,
            AlertKind::Other(_) => Priority::Medium,
        }
    }

    /// Occurrences admitted per dedup window before repeats are filtered.
    pub fn admission_quota(&self) -> u32 {
        match self {
            Priority::High => 5,
            Priority::Medium => 3,
            Priority::Low => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH_PRIORITY",
            Priority::Medium => "MEDIUM_PRIORITY",
            Priority::Low => "LOW_PRIORITY",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
