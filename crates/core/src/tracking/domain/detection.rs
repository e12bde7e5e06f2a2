use serde::{Deserialize, Serialize};

use crate::shared::bounding_box::BoundingBox;

/// One person-class detection for a single frame.
///
/// Class filtering and the confidence cut-off happen in the detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub confidence: f64,
}

impl Detection {
    pub fn new(bbox: BoundingBox, confidence: f64) -> Self {
        Self { bbox, confidence }
    }
}
