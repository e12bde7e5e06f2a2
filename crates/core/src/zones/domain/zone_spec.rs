use serde::{Deserialize, Serialize};

use crate::shared::bounding_box::Point;
use crate::shared::frame_size::FrameSize;

use super::zone::{Zone, ZoneError};

/// A zone described in fractions of frame width and height, so one
/// layout fits any camera resolution. Resolved to pixels once, from the
/// first frame's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    /// `[x, y]` pairs in `0.0..=1.0`.
    pub vertices: Vec<[f64; 2]>,
    pub max_occupancy: usize,
}

impl ZoneSpec {
    /// Axis-aligned rectangle from `(x0, y0)` to `(x1, y1)`.
    pub fn rectangle(
        name: impl Into<String>,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
        max_occupancy: usize,
    ) -> Self {
        Self {
            name: name.into(),
            vertices: vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]],
            max_occupancy,
        }
    }

    /// Checks geometry that does not depend on frame size.
    pub fn validate(&self) -> Result<(), ZoneError> {
        if self.vertices.len() < 3 {
            return Err(ZoneError::TooFewVertices {
                name: self.name.clone(),
                count: self.vertices.len(),
            });
        }
        for value in self.vertices.iter().flatten() {
            if !(0.0..=1.0).contains(value) {
                return Err(ZoneError::FractionOutOfRange {
                    name: self.name.clone(),
                    value: *value,
                });
            }
        }
        if fractional_area(&self.vertices) == 0.0 {
            return Err(ZoneError::Degenerate {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Scales the fractional polygon to pixel coordinates (truncating).
    pub fn to_zone(&self, frame: FrameSize) -> Result<Zone, ZoneError> {
        self.validate()?;
        if frame.is_empty() {
            return Err(ZoneError::EmptyFrame {
                width: frame.width,
                height: frame.height,
            });
        }

        let polygon = self
            .vertices
            .iter()
            .map(|[fx, fy]| {
                Point::new(
                    (fx * frame.width as f64) as i32,
                    (fy * frame.height as f64) as i32,
                )
            })
            .collect();
        Zone::new(self.name.clone(), polygon, self.max_occupancy)
    }
}

/// Bottom-right equipment area (one person allowed) and top-right server
/// room (nobody allowed).
pub fn default_zone_specs() -> Vec<ZoneSpec> {
    vec![
        ZoneSpec::rectangle("Equipment Zone", (0.7, 0.6), (1.0, 1.0), 1),
        ZoneSpec::rectangle("Server Room", (0.7, 0.0), (1.0, 0.3), 0),
    ]
}

fn fractional_area(vertices: &[[f64; 2]]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let [ax, ay] = vertices[i];
            let [bx, by] = vertices[(i + 1) % n];
            ax * by - bx * ay
        })
        .sum();
    (twice / 2.0).abs()
}
