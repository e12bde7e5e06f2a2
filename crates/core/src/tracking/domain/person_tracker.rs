use crate::tracking::domain::detection::Detection;
use crate::tracking::domain::track::Track;

/// Domain interface for frame-to-frame identity assignment.
///
/// Called exactly once per frame. Returns the full live set: matched
/// tracks plus those still within the missing tolerance. Implementations
/// are stateful, hence `&mut self`, and are not meant to be shared
/// between threads.
pub trait PersonTracker: Send {
    fn update(&mut self, detections: &[Detection], now: f64) -> Vec<Track>;
}
