/// Minimum IoU for a detection to continue an existing track.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.3;

/// Max frames a track can go unmatched before removal (~1 second at 30 fps).
pub const TRACKER_MAX_MISSING: usize = 30;

/// Seconds of presence before any per-person alert may fire.
pub const DEFAULT_OBSERVATION_WINDOW_SECS: f64 = 60.0;
pub const DEFAULT_IDLE_THRESHOLD_SECS: f64 = 120.0;
pub const DEFAULT_SUSPICIOUS_THRESHOLD_SECS: f64 = 180.0;
/// Pixel displacement that counts as movement.
pub const DEFAULT_MOVEMENT_THRESHOLD_PX: f64 = 5.0;
pub const DEFAULT_CROWD_DISTANCE_PX: f64 = 50.0;
pub const DEFAULT_CROWD_COUNT: usize = 3;
/// Per-person, per-kind re-alert interval.
pub const DEFAULT_ALERT_COOLDOWN_SECS: f64 = 10.0;

pub const DEFAULT_DEDUP_WINDOW_SECS: f64 = 30.0;
pub const DEFAULT_GLOBAL_COOLDOWN_SECS: f64 = 30.0;
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
pub const DEFAULT_ENQUEUE_TIMEOUT_SECS: f64 = 1.0;
pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_STOP_TIMEOUT_SECS: f64 = 5.0;
pub const DEFAULT_LOG_DIR: &str = "logs";
