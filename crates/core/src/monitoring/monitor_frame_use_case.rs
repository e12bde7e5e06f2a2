use crate::alerts::domain::alert_notifier::LogAlertNotifier;
use crate::alerts::domain::alert_queue::{AlertPipelineError, AlertQueue};
use crate::alerts::domain::statistics::AlertStatistics;
use crate::alerts::infrastructure::jsonl_alert_sink::JsonlAlertSink;
use crate::alerts::infrastructure::threaded_alert_pipeline::ThreadedAlertPipeline;
use crate::behavior::domain::behavior_analyzer::BehaviorAnalyzer;
use crate::shared::alert::Alert;
use crate::shared::frame_size::FrameSize;
use crate::tracking::domain::detection::Detection;
use crate::tracking::domain::person_tracker::PersonTracker;
use crate::tracking::domain::track::{Track, TrackObservation};
use crate::tracking::infrastructure::iou_tracker::IouTracker;
use crate::zones::domain::restricted_area_checker::RestrictedAreaChecker;
use crate::zones::domain::zone::{Zone, ZoneError};
use crate::zones::domain::zone_spec::ZoneSpec;

use super::monitor_config::MonitorConfig;

/// What one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Live tracks, including ones currently unmatched.
    pub tracks: Vec<Track>,
    /// Every alert raised this frame, before deduplication.
    pub alerts: Vec<Alert>,
    /// How many of `alerts` made it into the queue.
    pub enqueued: usize,
}

/// Per-frame pipeline: track → analyze behavior → check zones → enqueue.
///
/// Zone geometry is resolved lazily from the first frame's size, since
/// zones are configured as fractions of the frame.
pub struct MonitorFrameUseCase {
    tracker: Box<dyn PersonTracker>,
    analyzer: BehaviorAnalyzer,
    zone_specs: Vec<ZoneSpec>,
    checker: Option<RestrictedAreaChecker>,
    alerts: Box<dyn AlertQueue>,
}

impl MonitorFrameUseCase {
    /// Rejects invalid zone geometry up front, before any frame is seen.
    pub fn new(
        tracker: Box<dyn PersonTracker>,
        analyzer: BehaviorAnalyzer,
        zone_specs: Vec<ZoneSpec>,
        alerts: Box<dyn AlertQueue>,
    ) -> Result<Self, ZoneError> {
        for spec in &zone_specs {
            spec.validate()?;
        }
        Ok(Self {
            tracker,
            analyzer,
            zone_specs,
            checker: None,
            alerts,
        })
    }

    /// Wires the standard components: IoU tracker, JSONL alert log,
    /// log-backed notifier and a started background pipeline.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let sink = JsonlAlertSink::create(&config.alerts.log_dir)?;
        let mut pipeline = ThreadedAlertPipeline::new(
            config.alerts.clone(),
            Box::new(sink),
            Box::new(LogAlertNotifier),
        );
        pipeline.start()?;

        let use_case = Self::new(
            Box::new(IouTracker::new(config.tracker.clone())),
            BehaviorAnalyzer::new(config.behavior.clone()),
            config.zones.clone(),
            Box::new(pipeline),
        )?;
        Ok(use_case)
    }

    /// Resolves zones against `frame`. Called automatically on the first
    /// frame; later calls re-resolve for a new resolution.
    pub fn initialize_zones(&mut self, frame: FrameSize) -> Result<(), ZoneError> {
        self.checker = Some(RestrictedAreaChecker::from_specs(&self.zone_specs, frame)?);
        Ok(())
    }

    pub fn process_frame(
        &mut self,
        frame: FrameSize,
        detections: &[Detection],
        now: f64,
    ) -> Result<FrameReport, ZoneError> {
        if self.checker.is_none() {
            self.initialize_zones(frame)?;
        }

        let tracks = self.tracker.update(detections, now);
        let observations: Vec<TrackObservation> = tracks.iter().map(TrackObservation::from).collect();

        let mut alerts = self.analyzer.analyse(&observations, now);
        if let Some(checker) = &self.checker {
            alerts.extend(checker.check(&observations, now));
        }

        let enqueued = alerts
            .iter()
            .filter(|alert| self.alerts.log_alert((*alert).clone()))
            .count();

        Ok(FrameReport {
            tracks,
            alerts,
            enqueued,
        })
    }

    /// Zone polygons in pixels; empty until the first frame.
    pub fn zones(&self) -> &[Zone] {
        match &self.checker {
            Some(checker) => checker.zones(),
            None => &[],
        }
    }

    pub fn statistics(&self) -> AlertStatistics {
        self.alerts.statistics()
    }

    /// Drains and stops the alert queue, returning the final counters.
    pub fn shutdown(&mut self) -> Result<AlertStatistics, AlertPipelineError> {
        self.alerts.shutdown()?;
        Ok(self.alerts.statistics())
    }
}
