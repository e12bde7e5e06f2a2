use crate::shared::alert::Alert;
use crate::shared::frame_size::FrameSize;
use crate::tracking::domain::track::TrackObservation;

use super::zone::{Zone, ZoneError};
use super::zone_spec::ZoneSpec;

/// Flags zones holding more people than they allow.
///
/// Emits at most one RESTRICTED_AREA_BREACH per zone per call, attributed
/// to the first person found inside (in track order) even when several
/// people are over the limit. Zones are checked independently, so a person
/// standing where two zones overlap counts toward both.
pub struct RestrictedAreaChecker {
    zones: Vec<Zone>,
}

impl RestrictedAreaChecker {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Resolves fractional specs against the frame size. Any invalid zone
    /// fails the whole setup.
    pub fn from_specs(specs: &[ZoneSpec], frame: FrameSize) -> Result<Self, ZoneError> {
        let zones = specs
            .iter()
            .map(|spec| spec.to_zone(frame))
            .collect::<Result<Vec<_>, _>>()?;
        for zone in &zones {
            log::info!(
                "Restricted zone '{}' ({} vertices, max {} people)",
                zone.name(),
                zone.polygon().len(),
                zone.max_occupancy()
            );
        }
        Ok(Self::new(zones))
    }

    /// Read-only zone geometry, e.g. for drawing overlays.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn check(&self, tracks: &[TrackObservation], now: f64) -> Vec<Alert> {
        self.zones
            .iter()
            .filter_map(|zone| {
                let inside: Vec<u32> = tracks
                    .iter()
                    .filter(|t| zone.contains(t.center))
                    .map(|t| t.id)
                    .collect();
                if inside.len() > zone.max_occupancy() {
                    let details = format!("{} people in {}", inside.len(), zone.name());
                    Some(Alert::restricted_area_breach(inside[0], details, now))
                } else {
                    None
                }
            })
            .collect()
    }
}
